use tracing::{debug, warn};

use crate::error::Result;
use crate::play::client::PublishingApi;
use crate::play::track::Track;

/// An open edit. Closed exactly once: by [`EditSession::close`], or on drop.
///
/// `close` reports failures to the caller. A drop without `close` (early
/// return, `?`, unwinding) still deletes the edit but can only log a failure.
pub struct EditSession<'a, A: PublishingApi + ?Sized> {
  api: &'a A,
  package_name: &'a str,
  edit_id: String,
  closed: bool,
}

impl<'a, A: PublishingApi + ?Sized> EditSession<'a, A> {
  pub fn open(api: &'a A, package_name: &'a str) -> Result<Self> {
    let edit_id = api.insert_edit(package_name)?;
    debug!("edit session {edit_id} open");
    Ok(Self {
      api,
      package_name,
      edit_id,
      closed: false,
    })
  }

  pub fn id(&self) -> &str {
    &self.edit_id
  }

  pub fn track(&self, track: &str) -> Result<Track> {
    self.api.get_track(self.package_name, &self.edit_id, track)
  }

  pub fn close(mut self) -> Result<()> {
    self.closed = true;
    self.api.delete_edit(self.package_name, &self.edit_id)
  }
}

impl<A: PublishingApi + ?Sized> Drop for EditSession<'_, A> {
  fn drop(&mut self) {
    if self.closed {
      return;
    }
    self.closed = true;
    if let Err(e) = self.api.delete_edit(self.package_name, &self.edit_id) {
      warn!("failed to delete edit {}: {e}", self.edit_id);
    }
  }
}
