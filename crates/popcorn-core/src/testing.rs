//! Scripted collaborators shared by the controller tests.

use async_trait::async_trait;
use popcorn_models::{MovieDetail, SearchResultItem};
use popcorn_sources::{CatalogError, CatalogSource};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use crate::title::TitleSurface;

#[derive(Clone)]
pub enum Script<T> {
    Ready(Result<T, CatalogError>),
    /// Never completes; only ends by being dropped
    Hang,
}

/// Records a request whose future was dropped before it completed
struct DropRecorder {
    label: String,
    log: Arc<Mutex<Vec<String>>>,
    completed: bool,
}

impl Drop for DropRecorder {
    fn drop(&mut self) {
        if !self.completed {
            self.log.lock().unwrap().push(self.label.clone());
        }
    }
}

#[derive(Default)]
pub struct ScriptedCatalog {
    searches: Mutex<HashMap<String, Script<Vec<SearchResultItem>>>>,
    details: Mutex<HashMap<String, Script<MovieDetail>>>,
    calls: Mutex<Vec<String>>,
    aborted: Arc<Mutex<Vec<String>>>,
}

impl ScriptedCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_search(self, query: &str, script: Script<Vec<SearchResultItem>>) -> Self {
        self.searches.lock().unwrap().insert(query.to_string(), script);
        self
    }

    pub fn on_detail(self, id: &str, script: Script<MovieDetail>) -> Self {
        self.details.lock().unwrap().insert(id.to_string(), script);
        self
    }

    /// Every request issued, as `search:<query>` or `detail:<id>`
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Requests dropped before completion
    pub fn aborted(&self) -> Vec<String> {
        self.aborted.lock().unwrap().clone()
    }

    async fn run<T: Clone>(&self, label: String, script: Option<Script<T>>) -> Result<T, CatalogError> {
        self.calls.lock().unwrap().push(label.clone());
        let mut recorder = DropRecorder {
            label,
            log: Arc::clone(&self.aborted),
            completed: false,
        };
        match script {
            Some(Script::Ready(outcome)) => {
                tokio::task::yield_now().await;
                recorder.completed = true;
                outcome
            }
            Some(Script::Hang) => {
                std::future::pending::<()>().await;
                unreachable!()
            }
            None => {
                recorder.completed = true;
                Err(CatalogError::NotFound("unscripted".to_string()))
            }
        }
    }
}

#[async_trait]
impl CatalogSource for ScriptedCatalog {
    fn source_name(&self) -> &str {
        "scripted"
    }

    async fn search(&self, query: &str) -> Result<Vec<SearchResultItem>, CatalogError> {
        let script = self.searches.lock().unwrap().get(query).cloned();
        self.run(format!("search:{}", query), script).await
    }

    async fn movie_detail(&self, catalog_id: &str) -> Result<MovieDetail, CatalogError> {
        let script = self.details.lock().unwrap().get(catalog_id).cloned();
        self.run(format!("detail:{}", catalog_id), script).await
    }
}

#[derive(Debug, Clone, Default)]
pub struct RecordedTitle {
    pub history: Vec<String>,
}

impl RecordedTitle {
    pub fn current(&self) -> Option<&str> {
        self.history.last().map(String::as_str)
    }
}

impl TitleSurface for RecordedTitle {
    fn set_title(&mut self, title: &str) {
        self.history.push(title.to_string());
    }
}

pub fn result_item(id: &str, title: &str) -> SearchResultItem {
    SearchResultItem {
        catalog_id: id.to_string(),
        title: title.to_string(),
        year: "2005".to_string(),
        poster_url: None,
        kind: Some("movie".to_string()),
    }
}

pub fn movie_detail(id: &str, title: &str, runtime_minutes: Option<u32>, imdb_rating: Option<f64>) -> MovieDetail {
    MovieDetail {
        catalog_id: id.to_string(),
        title: title.to_string(),
        year: "2005".to_string(),
        runtime: runtime_minutes.map(|m| format!("{} min", m)).unwrap_or_else(|| "N/A".to_string()),
        runtime_minutes,
        imdb_rating,
        plot: "A plot.".to_string(),
        released: "15 Jun 2005".to_string(),
        actors: "Christian Bale".to_string(),
        director: "Christopher Nolan".to_string(),
        genre: "Action".to_string(),
        poster_url: None,
    }
}

/// Let spawned request tasks run to their next suspension point
pub async fn settle_tasks() {
    for _ in 0..20 {
        tokio::task::yield_now().await;
    }
}
