// In-memory collaborators shared by the integration tests
#![allow(dead_code)]

use async_trait::async_trait;
use casting_match::core::{
    AdminAllowList, CandidatePage, CandidateRetriever, Criteria, Matcher, NotificationSink,
    PostingRepository, ProfileRepository, RepositoryError, WeightManager,
};
use casting_match::models::{Candidate, Casting, MatchResult};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub const ADMIN_ID: &str = "admin-1";

#[derive(Default)]
pub struct InMemoryStore {
    pub models: Vec<Candidate>,
    pub castings: HashMap<String, Casting>,
    pub fail_search: bool,
    pub search_calls: AtomicUsize,
}

impl InMemoryStore {
    pub fn new(models: Vec<Candidate>, castings: Vec<Casting>) -> Self {
        Self {
            models,
            castings: castings.into_iter().map(|c| (c.id.clone(), c)).collect(),
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self { fail_search: true, ..Self::default() }
    }
}

#[async_trait]
impl CandidateRetriever for InMemoryStore {
    async fn search(
        &self,
        _criteria: &Criteria,
        page: u32,
        page_size: u32,
        public_only: bool,
    ) -> Result<CandidatePage, RepositoryError> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_search {
            return Err(RepositoryError::Backend("connection reset".to_string()));
        }

        let visible: Vec<Candidate> = self
            .models
            .iter()
            .filter(|m| !public_only || m.is_public)
            .cloned()
            .collect();
        let total = visible.len() as u64;
        let skip = (page.saturating_sub(1) * page_size) as usize;

        Ok(CandidatePage {
            candidates: visible.into_iter().skip(skip).take(page_size as usize).collect(),
            total,
        })
    }
}

#[async_trait]
impl ProfileRepository for InMemoryStore {
    async fn find_model(&self, id: &str) -> Result<Candidate, RepositoryError> {
        self.models
            .iter()
            .find(|m| m.id == id)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound(format!("model {}", id)))
    }
}

#[async_trait]
impl PostingRepository for InMemoryStore {
    async fn find_casting(&self, id: &str) -> Result<Casting, RepositoryError> {
        self.castings
            .get(id)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound(format!("casting {}", id)))
    }
}

#[derive(Default)]
pub struct RecordingSink {
    pub received: Mutex<Vec<(String, Vec<String>)>>,
    pub fail: bool,
}

#[async_trait]
impl NotificationSink for RecordingSink {
    async fn notify_top_matches(
        &self,
        casting: &Casting,
        matches: &[MatchResult],
    ) -> Result<(), RepositoryError> {
        let ids = matches.iter().map(|m| m.model_id.clone()).collect();
        self.received.lock().unwrap().push((casting.id.clone(), ids));
        if self.fail {
            Err(RepositoryError::Backend("push gateway unavailable".to_string()))
        } else {
            Ok(())
        }
    }
}

pub fn create_weights() -> Arc<WeightManager> {
    Arc::new(WeightManager::with_default_weights(Arc::new(AdminAllowList::new([ADMIN_ID]))))
}

pub fn create_matcher(store: Arc<InMemoryStore>) -> Matcher {
    Matcher::new(store.clone(), store.clone(), store, create_weights())
}

pub fn create_model(id: &str, city: &str, height_cm: f64, categories: &[&str]) -> Candidate {
    Candidate {
        id: id.to_string(),
        display_name: format!("Model {}", id),
        gender: Some("female".to_string()),
        age: Some(25),
        city: Some(city.to_string()),
        height_cm: Some(height_cm),
        weight_kg: Some(55.0),
        experience_years: Some(4),
        rating: Some(4.6),
        categories: categories.iter().map(|c| c.to_string()).collect(),
        languages: ["russian".to_string()].into_iter().collect(),
        is_public: true,
    }
}

pub fn create_casting(id: &str) -> Casting {
    Casting {
        id: id.to_string(),
        title: "Autumn lookbook".to_string(),
        owner_id: "employer-1".to_string(),
        city: Some("Almaty".to_string()),
        gender: Some("female".to_string()),
        age_min: Some(20),
        age_max: Some(30),
        height_min: Some(168),
        height_max: Some(180),
        weight_min: Some(48),
        weight_max: Some(60),
        categories: vec!["fashion".to_string()],
        languages: vec!["russian".to_string()],
        job_type: Some("photo".to_string()),
    }
}

/// Against `create_casting` these score, in order: perfect 100,
/// commercial 88, short 87.5, elsewhere 78.33, novice 33.83.
pub fn sample_models() -> Vec<Candidate> {
    let mut novice = create_model("novice", "Shymkent", 150.0, &["sport"]);
    novice.experience_years = Some(1);
    novice.rating = Some(3.0);

    vec![
        create_model("perfect", "Almaty", 172.0, &["fashion"]),
        create_model("short", "Almaty", 160.0, &["fashion"]),
        create_model("elsewhere", "Astana", 172.0, &["fashion"]),
        create_model("commercial", "Almaty", 175.0, &["commercial"]),
        novice,
    ]
}
