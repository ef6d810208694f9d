// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! The run/event/image hierarchy and its sequential builder.
//!
//! A [`Drdf`] container is populated through a single forward cursor:
//! [`Drdf::start_run`] opens a run, [`Drdf::start_event`] opens an event in
//! that run, and [`Drdf::add_image`] attaches images to the open event.
//! All three levels keep insertion order, which is the on-disk order.

use uuid::Uuid;

use super::image::Image;
use crate::core::{DrdfError, OrderedMap, Result};

/// Event identifier, unique within a run.
pub type EventId = u32;

/// Images of one event, keyed by source name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Event {
    images: OrderedMap<String, Image>,
}

impl Event {
    /// Create an empty event.
    pub fn new() -> Self {
        Self::default()
    }

    /// Iterate over `(source, image)` pairs in insertion order.
    pub fn images(&self) -> impl Iterator<Item = (&str, &Image)> {
        self.images.iter().map(|(source, image)| (source.as_str(), image))
    }

    /// Image captured by `source`.
    pub fn image(&self, source: &str) -> Option<&Image> {
        self.images.get(source)
    }

    /// Number of images.
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// Whether the event holds no images.
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    fn insert(&mut self, source: String, image: Image) -> Option<Image> {
        self.images.insert(source, image)
    }
}

/// Events of one run plus its georeference.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Run {
    georef: Option<String>,
    events: OrderedMap<EventId, Event>,
}

impl Run {
    /// Create an empty run without a georeference.
    pub fn new() -> Self {
        Self::default()
    }

    /// Georeference text, if set.
    pub fn georef(&self) -> Option<&str> {
        self.georef.as_deref()
    }

    /// Iterate over `(id, event)` pairs in insertion order.
    pub fn events(&self) -> impl Iterator<Item = (EventId, &Event)> {
        self.events.iter().map(|(&id, event)| (id, event))
    }

    /// Event with the given id.
    pub fn event(&self, id: EventId) -> Option<&Event> {
        self.events.get(&id)
    }

    /// Number of events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether the run holds no events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// A DRDF container: runs keyed by UUID, in insertion order.
///
/// # Example
///
/// ```rust,no_run
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use drdf::{Drdf, FormatCode, Image};
/// use uuid::Uuid;
///
/// let mut file = Drdf::new();
/// file.start_run(Uuid::new_v4());
/// file.set_georef("DUMMY")?;
/// file.start_event(42)?;
/// file.add_image("CAM_NORTH_X05_Y00", Image::zeroed(24, 24, FormatCode::Au16Tu16))?;
/// file.write("foo.drdf")?;
///
/// let copy = Drdf::read("foo.drdf")?;
/// assert_eq!(copy, file);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct Drdf {
    runs: OrderedMap<Uuid, Run>,
    current_run: Option<Uuid>,
    current_event: Option<EventId>,
}

impl PartialEq for Drdf {
    /// Containers are equal when their content is; cursors are ignored.
    fn eq(&self, other: &Self) -> bool {
        self.runs == other.runs
    }
}

impl Drdf {
    /// Create an empty container.
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a new run and make it current.
    ///
    /// Re-using an existing id replaces that run with an empty one in
    /// its original position.
    pub fn start_run(&mut self, run_id: Uuid) {
        self.runs.insert(run_id, Run::new());
        self.current_run = Some(run_id);
        self.current_event = None;
    }

    /// Attach the georeference to the current run.
    pub fn set_georef(&mut self, georef: impl Into<String>) -> Result<()> {
        let georef = georef.into();
        ensure_ascii("set_georef", "georeference", &georef)?;
        let run = self.current_run_mut("set_georef")?;
        run.georef = Some(georef);
        Ok(())
    }

    /// Open a new event in the current run and make it current.
    pub fn start_event(&mut self, event_id: EventId) -> Result<()> {
        let run = self.current_run_mut("start_event")?;
        run.events.insert(event_id, Event::new());
        self.current_event = Some(event_id);
        Ok(())
    }

    /// Insert an image into the current event under `source`.
    ///
    /// Returns the image previously stored under the same source, if any.
    pub fn add_image(&mut self, source: impl Into<String>, image: Image) -> Result<Option<Image>> {
        let source = source.into();
        ensure_ascii("add_image", "source name", &source)?;
        let event = self.current_event_mut("add_image")?;
        Ok(event.insert(source, image))
    }

    /// Iterate over `(id, run)` pairs in insertion order.
    pub fn runs(&self) -> impl Iterator<Item = (&Uuid, &Run)> {
        self.runs.iter()
    }

    /// Run with the given id.
    pub fn run(&self, run_id: &Uuid) -> Option<&Run> {
        self.runs.get(run_id)
    }

    /// The unique image identified by run, event and source.
    pub fn find(&self, run_id: &Uuid, event_id: EventId, source: &str) -> Option<&Image> {
        self.runs.get(run_id)?.event(event_id)?.image(source)
    }

    /// Number of runs.
    pub fn len(&self) -> usize {
        self.runs.len()
    }

    /// Whether the container holds no runs.
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// Total number of events across all runs.
    pub fn event_count(&self) -> usize {
        self.runs.values().map(Run::len).sum()
    }

    /// Total number of images across all runs and events.
    pub fn image_count(&self) -> usize {
        self.runs
            .values()
            .flat_map(|run| run.events.values())
            .map(Event::len)
            .sum()
    }

    /// Id of the run currently open for writing.
    pub fn current_run(&self) -> Option<Uuid> {
        self.current_run
    }

    /// Id of the event currently open for writing.
    pub fn current_event(&self) -> Option<EventId> {
        self.current_event
    }

    /// Check that the container can be serialized.
    ///
    /// Every run must carry a georeference.
    pub fn validate(&self) -> Result<()> {
        for (id, run) in self.runs.iter() {
            if run.georef.is_none() {
                return Err(DrdfError::usage(
                    "write",
                    format!("run {id} has no georeference"),
                ));
            }
        }
        Ok(())
    }

    /// Append every event of `other` to the current run.
    ///
    /// Events are opened in `other`'s order through the regular builder
    /// calls, so the cursor ends on the last appended event. Returns the
    /// number of events appended.
    pub fn append_events_from(&mut self, other: &Drdf) -> Result<usize> {
        self.current_run_mut("append_events_from")?;
        let mut appended = 0;
        for (_, run) in other.runs() {
            for (event_id, event) in run.events() {
                self.start_event(event_id)?;
                for (source, image) in event.images() {
                    self.add_image(source, image.clone())?;
                }
                appended += 1;
            }
        }
        Ok(appended)
    }

    fn current_run_mut(&mut self, operation: &str) -> Result<&mut Run> {
        let id = self
            .current_run
            .ok_or_else(|| DrdfError::usage(operation, "no current run"))?;
        self.runs
            .get_mut(&id)
            .ok_or_else(|| DrdfError::usage(operation, format!("run {id} is not open")))
    }

    fn current_event_mut(&mut self, operation: &str) -> Result<&mut Event> {
        let event_id = self
            .current_event
            .ok_or_else(|| DrdfError::usage(operation, "no current event"))?;
        let run = self.current_run_mut(operation)?;
        run.events
            .get_mut(&event_id)
            .ok_or_else(|| DrdfError::usage(operation, format!("event {event_id} is not open")))
    }
}

fn ensure_ascii(operation: &str, what: &str, text: &str) -> Result<()> {
    if text.is_ascii() {
        Ok(())
    } else {
        Err(DrdfError::encoding(format!(
            "{what} passed to {operation} is not ASCII: {text:?}"
        )))
    }
}
