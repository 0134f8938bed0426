//! Overridable reporting hooks.
//!
//! The mapper returns errors and never reports them itself. The surrounding
//! SQL layer reports through these process-wide hooks, which the host
//! application may replace. By default they emit `tracing` events.

use std::error::Error as StdError;
use std::sync::{Arc, OnceLock};

use parking_lot::RwLock;
use tracing::{error, info};

use crate::value::Value;

/// Hook receiving an error.
pub type ErrorHook = Arc<dyn Fn(&dyn StdError) + Send + Sync>;

/// Hook receiving a SQL statement and its arguments.
pub type SqlHook = Arc<dyn Fn(&str, &[Value]) + Send + Sync>;

struct Hooks {
    error: ErrorHook,
    panic: ErrorHook,
    sql: SqlHook,
}

impl Default for Hooks {
    fn default() -> Self {
        Self {
            error: Arc::new(default_log_error),
            panic: Arc::new(default_log_panic),
            sql: Arc::new(default_print_sql),
        }
    }
}

static HOOKS: OnceLock<RwLock<Hooks>> = OnceLock::new();

fn hooks() -> &'static RwLock<Hooks> {
    HOOKS.get_or_init(|| RwLock::new(Hooks::default()))
}

fn default_log_error(err: &dyn StdError) {
    error!(error = %err, "mapper error");
}

fn default_log_panic(err: &dyn StdError) {
    default_log_error(err);
}

fn default_print_sql(sql: &str, args: &[Value]) {
    if args.is_empty() {
        info!(sql, "sql");
    } else {
        info!(sql, args = ?args, "sql");
    }
}

/// Replace the error hook.
pub fn set_error_hook<F>(hook: F)
where
    F: Fn(&dyn StdError) + Send + Sync + 'static,
{
    hooks().write().error = Arc::new(hook);
}

/// Replace the panic hook.
pub fn set_panic_hook<F>(hook: F)
where
    F: Fn(&dyn StdError) + Send + Sync + 'static,
{
    hooks().write().panic = Arc::new(hook);
}

/// Replace the SQL tracing hook.
pub fn set_sql_hook<F>(hook: F)
where
    F: Fn(&str, &[Value]) + Send + Sync + 'static,
{
    hooks().write().sql = Arc::new(hook);
}

/// Restore the default hooks.
pub fn reset_hooks() {
    *hooks().write() = Hooks::default();
}

/// Report an error.
pub fn log_error(err: &dyn StdError) {
    // Clone out so a hook may replace hooks without deadlocking.
    let hook = Arc::clone(&hooks().read().error);
    hook(err);
}

/// Report a recovered panic.
pub fn log_panic(err: &dyn StdError) {
    let hook = Arc::clone(&hooks().read().panic);
    hook(err);
}

/// Trace a SQL statement and its arguments.
pub fn print_sql(sql: &str, args: &[Value]) {
    let hook = Arc::clone(&hooks().read().sql);
    hook(sql, args);
}
