//! Test doubles for the collaborator traits, used by unit and behaviour
//! tests across the workspace.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::{
    ActivityEntry, ActivityGenerator, GenerationError, HotelEntry, ReferenceCatalog,
    ReferenceData,
};

type GenerateFn = dyn Fn(&str) -> Result<String, GenerationError> + Send + Sync;

enum Script {
    Queue(Mutex<VecDeque<Result<String, GenerationError>>>),
    Function(Box<GenerateFn>),
}

/// Scripted `ActivityGenerator` that records how often it was called.
///
/// Queued responses are returned in order; once the queue is empty the
/// generator answers with empty text. Every call, including rejected empty
/// prompts, is counted and the prompt retained for inspection.
pub struct StubActivityGenerator {
    script: Script,
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl std::fmt::Debug for StubActivityGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StubActivityGenerator")
            .field("calls", &self.calls())
            .finish_non_exhaustive()
    }
}

impl StubActivityGenerator {
    fn with_script(script: Script) -> Self {
        Self {
            script,
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Answer successive calls with the given texts.
    pub fn with_responses<I, S>(responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let queue = responses.into_iter().map(|text| Ok(text.into())).collect();
        Self::with_script(Script::Queue(Mutex::new(queue)))
    }

    /// Answer successive calls with the given outcomes.
    pub fn with_outcomes<I>(outcomes: I) -> Self
    where
        I: IntoIterator<Item = Result<String, GenerationError>>,
    {
        Self::with_script(Script::Queue(Mutex::new(outcomes.into_iter().collect())))
    }

    /// Fail every call with `error`.
    pub fn failing(error: GenerationError) -> Self {
        Self::from_fn(move |_| Err(error.clone()))
    }

    /// Compute each answer from the prompt.
    pub fn from_fn<F>(respond: F) -> Self
    where
        F: Fn(&str) -> Result<String, GenerationError> + Send + Sync + 'static,
    {
        Self::with_script(Script::Function(Box::new(respond)))
    }

    /// Number of calls received so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Prompts received so far, oldest first.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .map(|prompts| prompts.clone())
            .unwrap_or_default()
    }
}

impl ActivityGenerator for StubActivityGenerator {
    fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_owned());
        }
        if prompt.is_empty() {
            return Err(GenerationError::EmptyPrompt);
        }
        match &self.script {
            Script::Queue(queue) => queue
                .lock()
                .ok()
                .and_then(|mut pending| pending.pop_front())
                .unwrap_or_else(|| Ok(String::new())),
            Script::Function(respond) => respond(prompt),
        }
    }
}

/// `ReferenceData` wrapper counting every lookup.
#[derive(Debug, Default)]
pub struct CountingReferenceData {
    catalog: ReferenceCatalog,
    hotel_calls: AtomicUsize,
    activity_calls: AtomicUsize,
    distance_calls: AtomicUsize,
}

impl CountingReferenceData {
    /// Wrap a catalog.
    pub fn new(catalog: ReferenceCatalog) -> Self {
        Self {
            catalog,
            ..Self::default()
        }
    }

    /// Total lookups of any kind.
    pub fn total_calls(&self) -> usize {
        self.hotel_calls.load(Ordering::SeqCst)
            + self.activity_calls.load(Ordering::SeqCst)
            + self.distance_calls.load(Ordering::SeqCst)
    }

    /// Number of `hotels` lookups.
    pub fn hotel_calls(&self) -> usize {
        self.hotel_calls.load(Ordering::SeqCst)
    }

    /// Number of `activities` lookups.
    pub fn activity_calls(&self) -> usize {
        self.activity_calls.load(Ordering::SeqCst)
    }
}

impl ReferenceData for CountingReferenceData {
    fn hotels(&self, city: &str) -> Vec<HotelEntry> {
        self.hotel_calls.fetch_add(1, Ordering::SeqCst);
        self.catalog.hotels(city)
    }

    fn activities(&self, city: &str) -> Vec<ActivityEntry> {
        self.activity_calls.fetch_add(1, Ordering::SeqCst);
        self.catalog.activities(city)
    }

    fn distance(&self, from: &str, to: &str) -> Option<f64> {
        self.distance_calls.fetch_add(1, Ordering::SeqCst);
        self.catalog.distance(from, to)
    }
}

/// Catalog with the three-city triangle `A-B = 100`, `A-C = 300`,
/// `B-C = 150` and a handful of hotels per city.
pub fn triangle_catalog() -> ReferenceCatalog {
    let mut catalog = ReferenceCatalog::default()
        .with_distance("A", "B", 100.0)
        .with_distance("A", "C", 300.0)
        .with_distance("B", "C", 150.0);
    for city in ["A", "B", "C"] {
        for (index, price) in [100.0, 200.0, 300.0, 400.0, 500.0].into_iter().enumerate() {
            catalog.push_hotel(HotelEntry::new(city, format!("{city} Hotel {index}"), price));
        }
        catalog.push_activity(ActivityEntry::new(city, format!("{city} Museum"), 40.0));
        catalog.push_activity(ActivityEntry::new(city, format!("{city} Market Tour"), 60.0));
    }
    catalog
}
