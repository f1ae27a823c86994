// Criterion benchmarks for the casting matcher

use async_trait::async_trait;
use casting_match::core::{
    calculate_match_score, AdminAllowList, CandidatePage, CandidateRetriever, Criteria, Matcher,
    PostingRepository, ProfileRepository, RepositoryError, WeightManager,
};
use casting_match::models::{Candidate, Casting, MatchingWeights};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::sync::Arc;

/// Ranking never touches the store; the benchmarks call `Matcher::rank` directly
struct EmptyStore;

#[async_trait]
impl CandidateRetriever for EmptyStore {
    async fn search(&self, _: &Criteria, _: u32, _: u32, _: bool) -> Result<CandidatePage, RepositoryError> {
        Ok(CandidatePage { candidates: vec![], total: 0 })
    }
}

#[async_trait]
impl ProfileRepository for EmptyStore {
    async fn find_model(&self, id: &str) -> Result<Candidate, RepositoryError> {
        Err(RepositoryError::NotFound(id.to_string()))
    }
}

#[async_trait]
impl PostingRepository for EmptyStore {
    async fn find_casting(&self, id: &str) -> Result<Casting, RepositoryError> {
        Err(RepositoryError::NotFound(id.to_string()))
    }
}

fn create_candidate(id: usize) -> Candidate {
    let cities = ["Almaty", "Astana", "Shymkent"];
    let categories = ["fashion", "commercial", "sport", "beauty"];

    Candidate {
        id: id.to_string(),
        display_name: format!("Model {}", id),
        gender: Some(if id % 2 == 0 { "female" } else { "male" }.to_string()),
        age: Some(18 + (id % 20) as u32),
        city: Some(cities[id % cities.len()].to_string()),
        height_cm: Some(160.0 + (id % 30) as f64),
        weight_kg: Some(45.0 + (id % 25) as f64),
        experience_years: Some((id % 6) as u32),
        rating: Some(3.0 + (id % 20) as f64 / 10.0),
        categories: [categories[id % categories.len()].to_string()].into_iter().collect(),
        languages: ["russian".to_string()].into_iter().collect(),
        is_public: true,
    }
}

fn create_casting() -> Casting {
    Casting {
        id: "casting".to_string(),
        title: "Lookbook".to_string(),
        city: Some("Almaty".to_string()),
        gender: Some("female".to_string()),
        age_min: Some(20),
        age_max: Some(30),
        height_min: Some(168),
        height_max: Some(180),
        weight_min: Some(48),
        weight_max: Some(60),
        categories: vec!["fashion".to_string(), "beauty".to_string()],
        languages: vec!["russian".to_string(), "english".to_string()],
        ..Casting::default()
    }
}

fn bench_match_score(c: &mut Criterion) {
    let criteria = Criteria::from_posting(&create_casting());
    let candidate = create_candidate(4);
    let weights = MatchingWeights::default();

    c.bench_function("calculate_match_score", |b| {
        b.iter(|| calculate_match_score(black_box(&candidate), black_box(&criteria), black_box(&weights)));
    });
}

fn bench_ranking(c: &mut Criterion) {
    let store = Arc::new(EmptyStore);
    let weights = Arc::new(WeightManager::with_default_weights(Arc::new(AdminAllowList::new(["admin"]))));
    let matcher = Matcher::new(store.clone(), store.clone(), store, weights);
    let criteria = Criteria::from_posting(&create_casting());
    let snapshot = matcher.weight_manager().weights();

    let mut group = c.benchmark_group("ranking");

    for candidate_count in [10, 100, 500, 1000].iter() {
        let candidates: Vec<Candidate> = (0..*candidate_count).map(create_candidate).collect();

        group.bench_with_input(
            BenchmarkId::new("rank", candidate_count),
            candidate_count,
            |b, _| {
                b.iter(|| {
                    matcher.rank(
                        black_box(&criteria),
                        black_box(candidates.clone()),
                        black_box(&snapshot),
                        black_box(20),
                        black_box(50.0),
                    )
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_match_score, bench_ranking);

criterion_main!(benches);
