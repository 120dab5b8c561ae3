//! Request/response contract tests for the REST router.

#![allow(clippy::unwrap_used)]

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;
use venture_match::api::rest::{AppState, create_router};
use venture_match::application::config::MatchingPolicy;
use venture_match::application::services::{ComplianceService, MatchingService};
use venture_match::domain::entities::{
    DealListing, InvestorPreferences, InvestorProfile, StartupCandidate,
};
use venture_match::domain::services::LimitPolicy;
use venture_match::domain::value_objects::{
    ApprovalStatus, DealId, InvestorId, RiskAppetite, Sector, Stage, StartupId,
};
use venture_match::infrastructure::persistence::in_memory::{
    InMemoryDealRepository, InMemoryInvestorRepository, InMemoryStartupRepository,
};
use venture_match::infrastructure::persistence::{
    DealRepository, InvestorRepository, StartupRepository,
};

struct Fixture {
    router: Router,
    investor: InvestorId,
    investor_without_prefs: InvestorId,
    startup: StartupId,
    deal: DealId,
}

async fn fixture() -> Fixture {
    let startups = Arc::new(InMemoryStartupRepository::new());
    let investors = Arc::new(InMemoryInvestorRepository::new());
    let deals = Arc::new(InMemoryDealRepository::new());

    let startup = StartupCandidate::new(StartupId::new_v4(), "PayLoop")
        .with_sector(Sector::FinTech)
        .with_stage(Stage::Mvp)
        .with_fundraising_goal(Decimal::from(5_000_000))
        .with_approval_status(ApprovalStatus::Approved);
    let pending = StartupCandidate::new(StartupId::new_v4(), "Hidden")
        .with_sector(Sector::FinTech)
        .with_stage(Stage::Mvp);
    startups.save(&startup).await.unwrap();
    startups.save(&pending).await.unwrap();

    let prefs = InvestorPreferences::new()
        .with_sectors([Sector::FinTech])
        .with_stages([Stage::Mvp])
        .with_investment_range(Some(Decimal::from(1_000_000)), Some(Decimal::from(10_000_000)))
        .unwrap()
        .with_risk_appetite(RiskAppetite::Aggressive);
    let investor = InvestorProfile::new(InvestorId::new_v4(), "Asha Rao", "angel")
        .with_preferences(prefs);
    let bare = InvestorProfile::new(InvestorId::new_v4(), "New Angel", "angel");
    investors.save(&investor).await.unwrap();
    investors.save(&bare).await.unwrap();

    let deal = DealListing::new(DealId::new_v4(), "PayLoop seed", startup.id(), 185, 200);
    deals.save(&deal).await.unwrap();

    let state = AppState {
        matching: Arc::new(MatchingService::new(
            startups,
            investors,
            MatchingPolicy::default(),
        )),
        compliance: Arc::new(ComplianceService::new(deals, LimitPolicy::default())),
    };

    Fixture {
        router: create_router(state),
        investor: investor.id(),
        investor_without_prefs: bare.id(),
        startup: startup.id(),
        deal: deal.id(),
    }
}

async fn send(router: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

mod health {
    use super::*;

    #[tokio::test]
    async fn reports_ok() {
        let f = fixture().await;
        let (status, body) = send(&f.router, Method::GET, "/api/v1/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }
}

mod matching {
    use super::*;

    #[tokio::test]
    async fn recommendations_only_include_approved_startups() {
        let f = fixture().await;
        let uri = format!("/api/v1/matching/recommendations?investor_id={}", f.investor);
        let (status, body) = send(&f.router, Method::GET, &uri, None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["total_startups"], 1);
        assert_eq!(body["recommendations"][0]["startup_name"], "PayLoop");
        assert!(body["recommendations"][0]["total_score"].as_u64().unwrap() >= 50);
    }

    #[tokio::test]
    async fn missing_preferences_is_400() {
        let f = fixture().await;
        let uri = format!(
            "/api/v1/matching/recommendations?investor_id={}",
            f.investor_without_prefs
        );
        let (status, body) = send(&f.router, Method::GET, &uri, None).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Preferences not set");
        assert_eq!(
            body["message"],
            "Please complete your investment preferences first"
        );
    }

    #[tokio::test]
    async fn unknown_investor_is_404() {
        let f = fixture().await;
        let uri = format!(
            "/api/v1/matching/recommendations?investor_id={}",
            InvestorId::new_v4()
        );
        let (status, _) = send(&f.router, Method::GET, &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn investors_for_startup_skip_unset_preferences() {
        let f = fixture().await;
        let uri = format!("/api/v1/matching/investors?startup_id={}", f.startup);
        let (status, body) = send(&f.router, Method::GET, &uri, None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["startup"]["name"], "PayLoop");
        assert_eq!(body["total_investors"], 1);
        assert_eq!(body["matches"][0]["investor_name"], "Asha Rao");
    }

    #[tokio::test]
    async fn saving_preferences_enables_recommendations() {
        let f = fixture().await;
        let put = format!("/api/v1/investors/{}/preferences", f.investor_without_prefs);
        let record = json!({
            "version": 1,
            "preferred_sectors": ["Fintech"],
            "preferred_stages": ["MVP"],
            "min_investment_amount": "10L",
            "max_investment_amount": "1Cr"
        });
        let (status, body) = send(&f.router, Method::PUT, &put, Some(record)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["preferences"]["preferred_sectors"][0], "FinTech");
        assert_eq!(body["preferences"]["min_investment_amount"], "1000000");
        assert_eq!(body["preferences"]["max_investment_amount"], "10000000");

        let get = format!(
            "/api/v1/matching/recommendations?investor_id={}",
            f.investor_without_prefs
        );
        let (status, _) = send(&f.router, Method::GET, &get, None).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn unsupported_preferences_version_is_422() {
        let f = fixture().await;
        let put = format!("/api/v1/investors/{}/preferences", f.investor);
        let (status, body) =
            send(&f.router, Method::PUT, &put, Some(json!({ "version": 99 }))).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["success"], false);
    }
}

mod compliance {
    use super::*;

    #[tokio::test]
    async fn deal_near_limit() {
        let f = fixture().await;
        let uri = format!("/api/v1/deals/{}/investor-limit", f.deal);
        let (status, body) = send(&f.router, Method::GET, &uri, None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["remaining_slots"], 15);
        assert_eq!(body["status"], "near_limit");
        assert_eq!(body["admission_blocked"], false);
    }

    #[tokio::test]
    async fn unknown_deal_is_404() {
        let f = fixture().await;
        let uri = format!("/api/v1/deals/{}/investor-limit", DealId::new_v4());
        let (status, _) = send(&f.router, Method::GET, &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn summary_counts_deals() {
        let f = fixture().await;
        let (status, body) =
            send(&f.router, Method::GET, "/api/v1/compliance/summary", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total_deals"], 1);
    }
}

mod calculator {
    use super::*;

    #[tokio::test]
    async fn runway() {
        let f = fixture().await;
        let body = json!({
            "cash_in_bank": "1200000",
            "monthly_revenue": "100000",
            "monthly_expenses": { "salaries": "150000", "rent": "50000" }
        });
        let (status, out) =
            send(&f.router, Method::POST, "/api/v1/calculator/runway", Some(body)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(out["success"], true);
        let months: Decimal = out["result"]["runway_months"].as_str().unwrap().parse().unwrap();
        assert_eq!(months, Decimal::from(12));
        assert_eq!(out["result"]["runway_status"], "healthy");
    }

    #[tokio::test]
    async fn ltv_cac_with_zero_customers_is_422() {
        let f = fixture().await;
        let body = json!({
            "ltv": { "arpu": "1000", "gross_margin": "80", "avg_customer_lifespan": "20" },
            "cac": { "total_sales_marketing_spend": "50000", "new_customers_acquired": 0 }
        });
        let (status, out) =
            send(&f.router, Method::POST, "/api/v1/calculator/ltv-cac", Some(body)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(out["success"], false);
    }

    #[tokio::test]
    async fn equity_split_sums_to_100() {
        let f = fixture().await;
        let founder = |name: &str| {
            json!({
                "name": name,
                "capital_invested": "0",
                "time_commitment": "100",
                "role_importance": "5",
                "ip_contribution": "5"
            })
        };
        let body = json!({ "co_founders": [founder("A"), founder("B"), founder("C")] });
        let (status, out) =
            send(&f.router, Method::POST, "/api/v1/calculator/equity-split", Some(body)).await;

        assert_eq!(status, StatusCode::OK);
        let total: Decimal = out["result"]["founders"]
            .as_array()
            .unwrap()
            .iter()
            .map(|f| f["equity_percentage"].as_str().unwrap().parse::<Decimal>().unwrap())
            .sum();
        assert_eq!(total, Decimal::ONE_HUNDRED);
    }

    #[tokio::test]
    async fn benchmarks_by_industry() {
        let f = fixture().await;
        let (status, out) = send(
            &f.router,
            Method::GET,
            "/api/v1/calculator/benchmarks/saas",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(out["result"]["industry"], "SaaS");

        let (status, _) = send(
            &f.router,
            Method::GET,
            "/api/v1/calculator/benchmarks/shipping",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }
}
