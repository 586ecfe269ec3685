//! Single-writer, snapshot-reader access to a [`Project`].

use std::ops::Deref;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::debug;

use crate::error::Result;
use crate::events::{ChangeEvent, EventBus, Topic};
use crate::project::Project;

/// An immutable view of the project at one revision.
///
/// Resolution on a snapshot holds no lock and never observes later updates.
#[derive(Debug, Clone)]
pub struct Snapshot {
    revision: u64,
    project: Arc<Project>,
}

impl Snapshot {
    pub fn revision(&self) -> u64 {
        self.revision
    }
}

impl Deref for Snapshot {
    type Target = Project;

    fn deref(&self) -> &Project {
        &self.project
    }
}

#[derive(Debug)]
struct Published {
    revision: u64,
    project: Arc<Project>,
}

/// A project shared between one writer at a time and any number of readers.
///
/// Updates run on a private copy that replaces the published project only
/// when the update succeeds.
///
/// # Example
///
/// ```rust
/// use stylecascade::{SharedProject, Topic};
///
/// let shared = SharedProject::default();
/// let before = shared.snapshot();
///
/// shared
///     .update(Topic::Variables, |project| project.create_collection("Theme"))
///     .unwrap();
/// assert!(shared
///     .update(Topic::Variables, |project| project.create_collection("Theme"))
///     .is_err());
///
/// assert_eq!(shared.revision(), 1);
/// assert!(before.variables().collection_by_name("Theme").is_none());
/// assert!(shared.snapshot().variables().collection_by_name("Theme").is_some());
/// ```
#[derive(Debug, Default)]
pub struct SharedProject {
    published: RwLock<Published>,
    events: EventBus,
}

impl Default for Published {
    fn default() -> Self {
        Self {
            revision: 0,
            project: Arc::new(Project::default()),
        }
    }
}

impl SharedProject {
    pub fn new(project: Project) -> Self {
        Self {
            published: RwLock::new(Published {
                revision: 0,
                project: Arc::new(project),
            }),
            events: EventBus::new(),
        }
    }

    /// The bus on which each successful update is announced.
    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn revision(&self) -> u64 {
        self.read(|published| published.revision)
    }

    pub fn snapshot(&self) -> Snapshot {
        self.read(|published| Snapshot {
            revision: published.revision,
            project: Arc::clone(&published.project),
        })
    }

    /// Applies `edit` under the write lock.
    ///
    /// On success the edited project is published, the revision is bumped and
    /// a [`ChangeEvent`] for `topic` is sent once the lock is released. On
    /// error nothing is published and the error is returned.
    ///
    /// Callbacks run on the writing thread with no lock held, so they may read
    /// [`snapshot`](Self::snapshot) or start another update. With concurrent
    /// writers, events can reach subscribers out of revision order, and by the
    /// time a callback runs the published revision may already be newer than
    /// `event.revision`. Subscribers that care compare the two and read the
    /// current snapshot instead of assuming one event per observed state.
    pub fn update<T>(&self, topic: Topic, edit: impl FnOnce(&mut Project) -> Result<T>) -> Result<T> {
        let (output, revision) = {
            let mut published = self
                .published
                .write()
                .unwrap_or_else(PoisonError::into_inner);
            let mut draft = Project::clone(&published.project);
            let output = edit(&mut draft)?;
            published.project = Arc::new(draft);
            published.revision += 1;
            (output, published.revision)
        };

        debug!(?topic, revision, "published project update");
        self.events.publish(ChangeEvent { topic, revision });
        Ok(output)
    }

    fn read<T>(&self, f: impl FnOnce(&Published) -> T) -> T {
        let published = self.published.read().unwrap_or_else(PoisonError::into_inner);
        f(&published)
    }
}

impl From<Project> for SharedProject {
    fn from(project: Project) -> Self {
        Self::new(project)
    }
}
