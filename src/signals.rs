use core::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;

static SIGINT: AtomicBool = AtomicBool::new(false);

/// Whether Ctrl-C was pressed since [`initialize`].
pub fn received_ctrl_c() -> bool {
    SIGINT.load(Ordering::SeqCst)
}

/// Installs the Ctrl-C handler. Long sweeps poll [`received_ctrl_c`] between
/// instances and return what they have collected so far.
pub fn initialize() -> Result<(), ctrlc::Error> {
    ctrlc::set_handler(|| {
        SIGINT.store(true, Ordering::SeqCst);
    })
}

#[cfg(test)]
mod tests {
    use crate::signals::received_ctrl_c;

    #[test]
    fn not_set_by_default() {
        assert!(!received_ctrl_c());
    }
}
