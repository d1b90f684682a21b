//! Environment access behind a trait so configuration can be tested without
//! touching the process environment.
//!
//! ```ignore
//! use gchat_translator::env::{InMemoryEnv, ReadEnv};
//!
//! let env = InMemoryEnv::new();
//! env.set("BOT_NAME", "translator"); // &self, no `mut` needed
//! assert_eq!(env.var("BOT_NAME").unwrap(), "translator");
//! ```

use std::env::VarError;

pub trait ReadEnv {
    fn var(&self, key: &str) -> Result<String, VarError>;

    /// Trimmed value, treating an empty string the same as an unset variable.
    fn non_empty(&self, key: &str) -> Option<String> {
        self.var(key)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }
}

/// Reads the process environment.
pub struct SystemEnv;

impl ReadEnv for SystemEnv {
    #[inline]
    fn var(&self, key: &str) -> Result<String, VarError> {
        std::env::var(key)
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use in_memory::InMemoryEnv;

#[cfg(any(test, feature = "test-support"))]
mod in_memory {
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::env::VarError;

    use super::ReadEnv;

    /// Won't touch the global process environment.
    #[derive(Default)]
    pub struct InMemoryEnv {
        vars: RefCell<HashMap<String, String>>,
    }

    impl InMemoryEnv {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn set(&self, key: impl Into<String>, value: impl Into<String>) {
            self.vars.borrow_mut().insert(key.into(), value.into());
        }

        pub fn remove(&self, key: &str) {
            self.vars.borrow_mut().remove(key);
        }
    }

    impl ReadEnv for InMemoryEnv {
        fn var(&self, key: &str) -> Result<String, VarError> {
            self.vars
                .borrow()
                .get(key)
                .cloned()
                .ok_or(VarError::NotPresent)
        }
    }
}
