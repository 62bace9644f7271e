//! Benchmarks for the recommendation pipeline.
//!
//! Run with: cargo bench --package recommender
//!
//! Uses a synthetic graph so the bench has no dataset dependency: 2000
//! movies, 5000 users, each user rating a deterministic pseudo-random
//! slice of the catalog.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use data_loader::MovieId;
use graph::GraphStore;
use recommender::{RecommendationEngine, RecommendationSelector, SimilarityScorer};

const MOVIES: i64 = 2000;
const USERS: i64 = 5000;

fn build_synthetic_store() -> GraphStore {
    let mut store = GraphStore::new();

    for m in 1..=MOVIES {
        let genre = match m % 4 {
            0 => "Drama",
            1 => "Comedy",
            2 => "Action",
            _ => "Thriller",
        };
        store
            .add_movie_vertex(
                -m,
                &format!("Movie {}", m),
                5.0 + (m % 50) as f32 / 10.0,
                (m % 60) as u32 + 1,
                vec![genre.to_string()],
            )
            .expect("fresh movie id");
    }

    for u in 1..=USERS {
        store.add_user_vertex(u).expect("fresh user id");
        // ~20 ratings per user, spread deterministically over the catalog.
        for k in 0..20 {
            let m = (u * 31 + k * 97) % MOVIES + 1;
            store.add_edge(u, -m).expect("edge endpoints exist");
        }
    }

    store
}

fn bench_score_users(c: &mut Criterion) {
    let store = build_synthetic_store();
    let scorer = SimilarityScorer::new();
    let liked: [MovieId; 3] = [-1, -2, -3];

    c.bench_function("score_users", |b| {
        b.iter(|| {
            let scores = scorer.score_users(black_box(&store), black_box(&liked));
            black_box(scores)
        })
    });
}

fn bench_select_candidates(c: &mut Criterion) {
    let store = build_synthetic_store();
    let scorer = SimilarityScorer::new();
    let selector = RecommendationSelector::new();
    let liked: [MovieId; 3] = [-1, -2, -3];
    let scores = scorer.score_users(&store, &liked);

    c.bench_function("select_candidates", |b| {
        b.iter(|| {
            let candidates = selector.select(black_box(&store), black_box(&scores), black_box(&liked));
            black_box(candidates)
        })
    });
}

fn bench_full_recommendation(c: &mut Criterion) {
    let store = build_synthetic_store();
    let engine = RecommendationEngine::new();
    let liked = vec![
        "Movie 1".to_string(),
        "Movie 2".to_string(),
        "Movie 3".to_string(),
    ];

    c.bench_function("recommend_top3", |b| {
        b.iter(|| {
            let ranked = engine
                .recommend(black_box(&store), black_box(&liked), black_box("Drama"))
                .expect("valid seeds");
            black_box(ranked)
        })
    });
}

criterion_group!(
    benches,
    bench_score_users,
    bench_select_candidates,
    bench_full_recommendation
);
criterion_main!(benches);
