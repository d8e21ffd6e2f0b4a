/// Host-side cursor capture.
pub trait CursorControl {
    /// Lock (and hide) the cursor, or release it.
    fn set_locked(&mut self, locked: bool);
}

/// Holds the cursor locked for as long as it lives.
///
/// The lock is taken on construction and released on drop, so a controller
/// that owns a guard gives the cursor back when it is destroyed.
pub struct CursorGuard {
    cursor: Box<dyn CursorControl>,
}

impl CursorGuard {
    pub fn lock(mut cursor: Box<dyn CursorControl>) -> Self {
        cursor.set_locked(true);
        log::info!("cursor locked");
        Self { cursor }
    }
}

impl Drop for CursorGuard {
    fn drop(&mut self) {
        self.cursor.set_locked(false);
        log::info!("cursor released");
    }
}

impl std::fmt::Debug for CursorGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CursorGuard").finish_non_exhaustive()
    }
}
