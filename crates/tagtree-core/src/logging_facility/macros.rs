//! Canonical logging macros
//!
//! These macros provide a structured, consistent way to log operations.

/// Log the start of an operation
///
/// # Example
///
/// ```
/// # use tagtree_core::log_op_start;
/// log_op_start!("place");
/// log_op_start!("place", node_id = "n123");
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = tagtree_core_types::schema::EVENT_START,
        )
    };
    ($op:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = tagtree_core_types::schema::EVENT_START,
            $($field)*
        )
    };
}

/// Log the successful end of an operation
///
/// # Example
///
/// ```
/// # use tagtree_core::log_op_end;
/// log_op_end!("place", duration_ms = 42);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = tagtree_core_types::schema::EVENT_END,
            duration_ms = $duration,
        )
    };
    ($op:expr, duration_ms = $duration:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = tagtree_core_types::schema::EVENT_END,
            duration_ms = $duration,
            $($field)*
        )
    };
}

/// Log an operation error
///
/// # Example
///
/// ```ignore
/// # use tagtree_core::{log_op_error, errors::TagTreeError};
/// let err = TagTreeError::NodeNotFound { node_id: "n1".to_string() };
/// log_op_error!("place", err, duration_ms = 10);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr) => {{
        use $crate::errors::TtError;
        let tt_err: TtError = $err.into();
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = tagtree_core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err_kind = ?tt_err.kind(),
            err_code = tt_err.code(),
        );
    }};
    ($op:expr, $err:expr, duration_ms = $duration:expr, $($field:tt)*) => {{
        use $crate::errors::TtError;
        let tt_err: TtError = $err.into();
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = tagtree_core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err_kind = ?tt_err.kind(),
            err_code = tt_err.code(),
            $($field)*
        );
    }};
}
