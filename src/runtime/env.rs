//! Environment variable access.

use std::env;

use super::RealRuntime;

impl RealRuntime {
    #[tracing::instrument(skip(self))]
    pub(crate) fn env_var_impl(&self, key: &str) -> Result<String, env::VarError> {
        env::var(key)
    }
}

#[cfg(test)]
mod tests {
    use crate::runtime::{RealRuntime, Runtime};

    #[test]
    fn test_real_runtime_env_var() {
        let runtime = RealRuntime;

        // PATH exists on all supported systems
        assert!(runtime.env_var("PATH").is_ok());
        assert!(
            runtime
                .env_var("DOWNLOADS_BADGE_SURELY_UNSET_VARIABLE")
                .is_err()
        );
    }
}
