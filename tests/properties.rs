//! Property tests for the scoring, compliance and calculator engines.

#![allow(clippy::unwrap_used)]

use proptest::prelude::*;
use rust_decimal::Decimal;
use venture_match::application::services::RecommendationFilter;
use venture_match::domain::entities::{InvestorPreferences, StartupCandidate};
use venture_match::domain::services::calculator::{
    CoFounder, DilutionInputs, calculate_dilution, calculate_equity_split,
    default_round_assumptions,
};
use venture_match::domain::services::investor_limit::evaluate;
use venture_match::domain::services::{LimitStatus, MatchScorer};
use venture_match::domain::value_objects::{
    ApprovalStatus, GeographicPreference, InvestorId, RiskAppetite, Sector, Stage, StartupId,
};

fn sector() -> impl Strategy<Value = Sector> {
    prop_oneof![
        Just(Sector::Technology),
        Just(Sector::Saas),
        Just(Sector::AiMl),
        Just(Sector::FinTech),
        Just(Sector::Healthcare),
        Just(Sector::CleanTech),
        Just(Sector::EdTech),
        Just(Sector::Other),
    ]
}

fn stage() -> impl Strategy<Value = Stage> {
    prop_oneof![
        Just(Stage::Idea),
        Just(Stage::Mvp),
        Just(Stage::EarlyRevenue),
        Just(Stage::Growth),
        Just(Stage::SeriesAPlus),
    ]
}

fn risk() -> impl Strategy<Value = Option<RiskAppetite>> {
    prop_oneof![
        Just(None),
        Just(Some(RiskAppetite::Conservative)),
        Just(Some(RiskAppetite::Moderate)),
        Just(Some(RiskAppetite::Aggressive)),
    ]
}

fn startup() -> impl Strategy<Value = StartupCandidate> {
    (sector(), stage(), proptest::option::of(1u64..1_000_000_000)).prop_map(
        |(sector, stage, goal)| {
            let s = StartupCandidate::new(StartupId::new_v4(), "Prop Startup")
                .with_sector(sector)
                .with_stage(stage)
                .with_approval_status(ApprovalStatus::Approved);
            match goal {
                Some(g) => s.with_fundraising_goal(Decimal::from(g)),
                None => s,
            }
        },
    )
}

fn preferences() -> impl Strategy<Value = InvestorPreferences> {
    (
        proptest::collection::vec(sector(), 0..4),
        proptest::collection::vec(stage(), 0..3),
        proptest::option::of(0u64..500_000_000),
        proptest::option::of(0u64..500_000_000),
        risk(),
        prop_oneof![
            Just(GeographicPreference::NoPreference),
            Just(GeographicPreference::National),
            Just(GeographicPreference::Local),
        ],
    )
        .prop_map(|(sectors, stages, a, b, risk, geo)| {
            let (min, max) = match (a, b) {
                (Some(x), Some(y)) => (Some(x.min(y)), Some(x.max(y))),
                other => other,
            };
            let mut prefs = InvestorPreferences::new()
                .with_sectors(sectors)
                .with_stages(stages)
                .with_investment_range(min.map(Decimal::from), max.map(Decimal::from))
                .unwrap()
                .with_geographic_preference(geo);
            if let Some(r) = risk {
                prefs = prefs.with_risk_appetite(r);
            }
            prefs
        })
}

proptest! {
    #[test]
    fn score_is_bounded_and_deterministic(s in startup(), p in preferences()) {
        let scorer = MatchScorer::default();
        let first = scorer.score(&s, &p).unwrap();
        let second = scorer.score(&s, &p).unwrap();
        prop_assert!(first.total_score <= 100);
        prop_assert!(first.breakdown.sector <= 100);
        prop_assert!(first.breakdown.stage <= 100);
        prop_assert!(first.breakdown.risk <= 100);
        prop_assert!(first.breakdown.location <= 100);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn investor_matches_are_sorted(
        startups in proptest::collection::vec(startup(), 0..12),
        p in preferences(),
    ) {
        let scorer = MatchScorer::default();
        let out = scorer
            .match_startups_for_investor(InvestorId::new_v4(), &startups, Some(&p))
            .unwrap();
        prop_assert_eq!(out.len(), startups.len());
        prop_assert!(out.windows(2).all(|w| w[0].total_score >= w[1].total_score));
    }

    #[test]
    fn filter_respects_threshold_and_limit(
        startups in proptest::collection::vec(startup(), 0..20),
        p in preferences(),
        threshold in 0u8..=100,
        limit in 1usize..10,
    ) {
        let scored = MatchScorer::default()
            .match_startups_for_investor(InvestorId::new_v4(), &startups, Some(&p))
            .unwrap();
        let out = RecommendationFilter::new(threshold, limit).apply(scored);
        prop_assert!(out.items.len() <= limit);
        prop_assert!(out.items.len() <= out.qualified);
        prop_assert!(out.items.iter().all(|m| m.total_score >= threshold));
        prop_assert!(out.items.windows(2).all(|w| w[0].total_score >= w[1].total_score));
    }

    #[test]
    fn limit_report_is_consistent(count in 0u32..400, limit in 1u32..400) {
        let report = evaluate(count, limit).unwrap();
        prop_assert_eq!(report.remaining_slots, limit.saturating_sub(count));
        prop_assert!(report.percentage >= 0.0 && report.percentage <= 100.0);
        prop_assert_eq!(report.admission_blocked, count >= limit);
        prop_assert_eq!(report.status == LimitStatus::LimitReached, count >= limit);
    }

    #[test]
    fn equity_split_sums_to_100(
        founders in proptest::collection::vec(
            (0u32..1_000_000, 0u32..=100, 0u32..=10, 0u32..=10),
            1..6,
        ),
    ) {
        let input: Vec<CoFounder> = founders
            .iter()
            .enumerate()
            .map(|(i, (capital, time, role, ip))| CoFounder {
                name: format!("Founder {i}"),
                capital_invested: Decimal::from(*capital),
                time_commitment: Decimal::from(*time),
                role_importance: Decimal::from(*role),
                ip_contribution: Decimal::from(*ip),
            })
            .collect();
        let out = calculate_equity_split(&input).unwrap();
        let total: Decimal = out.founders.iter().map(|f| f.equity_percentage).sum();
        prop_assert_eq!(total, Decimal::ONE_HUNDRED);
        prop_assert!(out.founders.iter().all(|f| f.equity_percentage >= Decimal::ZERO));
    }

    #[test]
    fn projected_ownership_never_increases(
        ownership in 1u32..=100,
        pre_money in 1u64..1_000_000_000,
        raise in 0u64..500_000_000,
        pool in 0u32..30,
    ) {
        let out = calculate_dilution(&DilutionInputs {
            current_ownership: Decimal::from(ownership),
            pre_money_valuation: Decimal::from(pre_money),
            investment_amount: Decimal::from(raise),
            option_pool_size: Decimal::from(pool),
            future_rounds: default_round_assumptions(),
        })
        .unwrap();
        prop_assert!(out.new_ownership <= Decimal::from(ownership));
        let mut previous = out.new_ownership;
        for round in &out.future_rounds {
            prop_assert!(round.projected_ownership <= previous);
            previous = round.projected_ownership;
        }
    }
}
