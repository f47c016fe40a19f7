//! Attach-last staging for the page overlay

use clickfx_core::Result;

/// Elements an install adds to the page
pub trait Overlay {
    fn attach(&self) -> Result<()>;
    fn detach(&self);
}

/// Run `setup`, attach `overlay`, then `start`.
///
/// The overlay is on the page only when all three succeed: a failed `setup`
/// never attaches it and a failed `start` detaches it again.
pub fn stage<O: Overlay + ?Sized>(
    overlay: &O,
    setup: impl FnOnce() -> Result<()>,
    start: impl FnOnce() -> Result<()>,
) -> Result<()> {
    setup()?;
    overlay.attach()?;
    if let Err(e) = start() {
        overlay.detach();
        return Err(e);
    }
    Ok(())
}
