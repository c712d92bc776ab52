//! Small crate-wide convenience macros.

/// Acquire a **mutable** borrow from a `RefCell` (or `Rc<RefCell>`).
/// If another borrow is still active the call panics – the standard
/// panic message emitted by `RefCell::borrow_mut()` is preserved to keep the
/// macro zero-cost.
///
/// ```rust,ignore
/// use std::cell::RefCell;
/// let cell = RefCell::new(1);
/// {
///     let mut n = mut_borrow!(cell);
///     *n += 1;
/// }
/// assert_eq!(*cell.borrow(), 2);
/// ```
#[macro_export]
macro_rules! mut_borrow {
    ($cell:expr) => {
        $cell.borrow_mut()
    };
}

/// Write an informational line to the browser console.
///
/// Native builds (unit tests) print to stderr instead so that pure logic can
/// log without touching wasm-bindgen imports.
///
/// ```rust,ignore
/// log_info!("[project] loaded {}", project.name);
/// ```
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {{
        #[cfg(target_arch = "wasm32")]
        web_sys::console::log_1(&format!($($arg)*).into());
        #[cfg(not(target_arch = "wasm32"))]
        eprintln!("[info] {}", format!($($arg)*));
    }};
}

/// Console warning, see [`log_info!`].
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {{
        #[cfg(target_arch = "wasm32")]
        web_sys::console::warn_1(&format!($($arg)*).into());
        #[cfg(not(target_arch = "wasm32"))]
        eprintln!("[warn] {}", format!($($arg)*));
    }};
}

/// Console error, see [`log_info!`].
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {{
        #[cfg(target_arch = "wasm32")]
        web_sys::console::error_1(&format!($($arg)*).into());
        #[cfg(not(target_arch = "wasm32"))]
        eprintln!("[error] {}", format!($($arg)*));
    }};
}
