//! Link repository trait (§6)
//!
//! Graph-shaped invariants (self-link, one incoming link per child, cycles,
//! depth <= 32) are defined in `application::services::link_service`
//! (`validate_new_link`); every `create` implementation of this trait is
//! required to run that check itself before inserting, so the invariant
//! holds no matter which entry point a caller uses — `InMemoryAdapter`'s
//! implementation does exactly this. `update` still rejects changes to
//! `parent_series_id` / `child_series_id` (§4.E), since that is a
//! structural invariant of a stored row, not a property of the whole graph.

use crate::domain::entities::{Link, LinkId, SeriesId};
use crate::domain::errors::CoreError;

pub trait LinkRepository {
    fn create(&mut self, link: Link) -> Result<LinkId, CoreError>;
    fn get(&self, id: LinkId) -> Result<Link, CoreError>;
    /// `ValidationError` if `parent_series_id` or `child_series_id` differ
    /// from the stored row.
    fn update(&mut self, link: Link) -> Result<(), CoreError>;
    fn delete(&mut self, id: LinkId) -> Result<(), CoreError>;
    fn all(&self) -> Vec<Link>;
    fn child_link(&self, child: SeriesId) -> Option<Link>;
    fn parent_links(&self, parent: SeriesId) -> Vec<Link>;
}
