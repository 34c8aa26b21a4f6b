// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Property-style checks for the pure scoring components: thermal offset,
//! warmth tiers, historical decay and garment fitness.

use std::collections::HashMap;

use chrono::{Duration, Utc};

use wardrobe_core::application::history::{decay_factor, HistoricalPreferenceModel};
use wardrobe_core::application::scoring::{cosine_similarity, ScoringContext, HISTORY_CLAMP};
use wardrobe_core::application::thermal;
use wardrobe_core::domain::feedback::{FeedbackRecord, FeedbackScore};
use wardrobe_core::domain::garment::{Category, Garment, GarmentId, WarmthLevel};
use wardrobe_core::domain::profile::{CommuteMethod, OwnerId, ThermalSensitivity, UserProfile};
use wardrobe_core::domain::warmth::WarmthRange;
use wardrobe_core::domain::weather::{CurrentConditions, WeatherContext, WeatherSignals};

fn weather(real: f64, apparent: f64, wind: f64) -> WeatherContext {
    WeatherContext {
        location: "Xiamen".to_string(),
        summary: "overcast".to_string(),
        current: CurrentConditions {
            temp_real: real,
            temp_apparent: apparent,
            humidity: 0.5,
            wind_speed: wind,
            sky: None,
        },
        today: None,
        signals: WeatherSignals::default(),
    }
}

fn profile(sensitivity: i8, commute: CommuteMethod) -> UserProfile {
    let mut p = UserProfile::default_for(OwnerId::new("u"));
    p.thermal_sensitivity = ThermalSensitivity::new(sensitivity).unwrap();
    p.commute = commute;
    p
}

fn record(score: FeedbackScore, temp: f64, days_ago: i64, garment: GarmentId) -> FeedbackRecord {
    let mut r = FeedbackRecord::new(OwnerId::new("u"), score, temp);
    r.recorded_at = Utc::now() - Duration::days(days_ago);
    r.top = Some(garment);
    r
}

#[test]
fn test_cold_cyclist_feels_four_degrees_colder() {
    let p = profile(-1, CommuteMethod::Cycle);
    let w = weather(8.0, 8.0, 7.0);

    assert_eq!(thermal::thermal_offset(&p, &w), -4.0);
    assert_eq!(thermal::feels_like(&p, &w), 4.0);
    assert_eq!(thermal::warmth_range(&p, &w), WarmthRange::new(4, 5));
}

#[test]
fn test_warmth_tiers_cover_every_temperature() {
    let mut t = -20.0;
    while t <= 45.0 {
        let range = WarmthRange::for_feels_like(t);
        assert!(range.min >= 1 && range.max <= 5 && range.min <= range.max, "t={t}");
        t += 0.5;
    }
}

#[test]
fn test_decay_after_thirty_and_sixty_days() {
    let now = Utc::now();
    assert!((decay_factor(now - Duration::days(30), now) - 0.9).abs() < 1e-9);
    assert!((decay_factor(now - Duration::days(60), now) - 0.81).abs() < 1e-9);
    assert_eq!(decay_factor(now + Duration::days(3), now), 1.0);
}

#[test]
fn test_only_thermal_penalty_applies_across_a_ten_degree_gap() {
    let id = GarmentId::new();
    let records = vec![
        record(FeedbackScore::TooCold, 20.0, 30, id),
        // adopted on a 25°C day: too far from today to count
        record(FeedbackScore::Adopted, 25.0, 0, id),
    ];

    let weights = HistoricalPreferenceModel::compute(&records, 10.0, Utc::now());
    let weight = weights.get(&id).copied().unwrap();
    assert!((weight - (-50.0 * 0.9)).abs() < 1e-9);
}

#[test]
fn test_history_bonus_clamped_both_ways() {
    let loved = GarmentId::new();
    let hated = GarmentId::new();
    let mut history = HashMap::new();
    history.insert(loved, 500.0);
    history.insert(hated, -500.0);

    let p = profile(0, CommuteMethod::Walk);
    let w = weather(20.0, 20.0, 0.0);
    let ctx = ScoringContext::new(&p, &w, &history);

    assert_eq!(ctx.history_bonus(loved), HISTORY_CLAMP);
    assert_eq!(ctx.history_bonus(hated), -HISTORY_CLAMP);
    assert_eq!(ctx.history_bonus(GarmentId::new()), 0.0);
}

#[test]
fn test_fitness_is_pure() {
    let mut g = Garment::new(OwnerId::new("u"), Category::Top, "hoodie", WarmthLevel::new(3).unwrap(), "grey");
    g.materials.insert("polyester".to_string());
    let mut history = HashMap::new();
    history.insert(g.id, 12.5);

    let mut p = profile(1, CommuteMethod::Cycle);
    p.sweat_tendency = true;
    let w = weather(28.0, 30.0, 6.0);
    let ctx = ScoringContext::new(&p, &w, &history);

    let first = ctx.fitness(&g);
    for _ in 0..5 {
        assert_eq!(ctx.fitness(&g), first);
    }
}

#[test]
fn test_cosine_neutral_without_embeddings() {
    let v: &[f32] = &[0.3, 0.4];
    assert_eq!(cosine_similarity(None, Some(v)), 0.5);
    assert_eq!(cosine_similarity(Some(v), None), 0.5);
    let empty: &[f32] = &[];
    assert_eq!(cosine_similarity(Some(empty), Some(empty)), 0.5);
}
