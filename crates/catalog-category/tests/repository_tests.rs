//! Functional tests for the category repository surface.

use catalog_category::{
    CategoryError, CategoryPatch, CategorySeed, MemoryAgentDirectory, NewCategory, StoreError,
};
use catalog_test_utils::{
    custom_category, empty_repository, inactive, localized_category, seeded_repository,
};
use pretty_assertions::assert_eq;
use std::sync::Arc;

#[tokio::test]
async fn active_listing_sorts_by_order_then_label() {
    let repo = seeded_repository([
        localized_category("hr", 1),
        custom_category("zeta", "Zeta", true),
        custom_category("alpha", "Alpha", true),
        inactive(localized_category("general", 0)),
    ]);

    let active = repo.get_active_categories().await.unwrap();
    let values: Vec<&str> = active.iter().map(|c| c.value.as_str()).collect();
    assert_eq!(values, vec!["alpha", "zeta", "hr"]);

    let all = repo.get_all_categories().await.unwrap();
    assert_eq!(all[0].value, "alpha");
    assert_eq!(all.len(), 4);
}

#[tokio::test]
async fn counts_attach_zero_for_unused_categories() {
    let agents = Arc::new(MemoryAgentDirectory::new());
    agents.assign("a1", Some("hr"));
    agents.assign("a2", Some("hr"));
    agents.assign("a3", Some("retired"));
    agents.assign("a4", None);

    let repo = seeded_repository([localized_category("business", 0), localized_category("hr", 1)])
        .with_agents(agents);

    let counted = repo.get_categories_with_counts().await.unwrap();
    let pairs: Vec<(&str, u64)> = counted
        .iter()
        .map(|c| (c.category.value.as_str(), c.agent_count))
        .collect();
    assert_eq!(pairs, vec![("business", 0), ("hr", 2)]);
}

#[tokio::test]
async fn counts_without_agent_source_are_zero() {
    let repo = seeded_repository([localized_category("hr", 0)]);
    let counted = repo.get_categories_with_counts().await.unwrap();
    assert_eq!(counted[0].agent_count, 0);

    let json = serde_json::to_value(&counted[0]).unwrap();
    assert_eq!(json["agentCount"], 0);
    assert_eq!(json["value"], "hr");
}

#[tokio::test]
async fn valid_values_are_active_and_distinct() {
    let repo = seeded_repository([
        localized_category("hr", 0),
        inactive(localized_category("general", 1)),
        custom_category("mine", "Mine", true),
    ]);
    assert_eq!(
        repo.get_valid_category_values().await.unwrap(),
        vec!["hr".to_string(), "mine".to_string()]
    );
}

#[tokio::test]
async fn seeding_keeps_existing_records() {
    let repo = seeded_repository([custom_category("hr", "People Ops", false)]);

    let result = repo
        .seed_categories(&[
            CategorySeed::new("hr"),
            CategorySeed::new("legal"),
            CategorySeed {
                value: "finance".into(),
                label: Some("Finance".into()),
                order: Some(9),
                custom: Some(true),
                ..CategorySeed::default()
            },
        ])
        .await
        .unwrap();
    assert_eq!(result.matched, 1);
    assert_eq!(result.upserted, 2);

    let hr = repo.find_category_by_value("hr").await.unwrap().unwrap();
    assert_eq!(hr.label, "People Ops");
    assert!(!hr.is_active);

    let legal = repo.find_category_by_value("legal").await.unwrap().unwrap();
    assert_eq!(legal.label, "legal");
    assert_eq!(legal.order, 1);
    assert!(legal.is_active);

    let finance = repo.find_category_by_value("finance").await.unwrap().unwrap();
    assert_eq!(finance.order, 9);
    assert!(finance.custom);
}

#[tokio::test]
async fn seeding_rejects_blank_value() {
    let repo = empty_repository();
    let err = repo
        .seed_categories(&[CategorySeed::new("ok"), CategorySeed::new(" ")])
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        CategoryError::Store(StoreError::PartialWrite { failed: 1, attempted: 2, .. })
    ));
}

#[tokio::test]
async fn create_find_update_delete() {
    let repo = empty_repository();

    let created = repo
        .create_category(
            NewCategory::new("research", "Research")
                .with_description("Deep dives")
                .with_order(3)
                .custom(),
        )
        .await
        .unwrap();
    assert!(created.custom && created.is_active);

    let by_id = repo.find_category_by_id(&created.id).await.unwrap().unwrap();
    assert_eq!(by_id, created);
    assert!(repo.find_category_by_id("missing").await.unwrap().is_none());

    let updated = repo
        .update_category("research", CategoryPatch::new().label("R&D").order(1))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.label, "R&D");
    assert_eq!(updated.order, 1);
    assert_eq!(updated.description, "Deep dives");
    assert!(updated.updated_at >= created.updated_at);

    assert!(repo
        .update_category("missing", CategoryPatch::new().active(false))
        .await
        .unwrap()
        .is_none());

    assert!(repo.delete_category("research").await.unwrap());
    assert!(!repo.delete_category("research").await.unwrap());
    assert!(repo.find_category_by_value("research").await.unwrap().is_none());
}

#[tokio::test]
async fn create_validates_input() {
    let repo = seeded_repository([localized_category("hr", 0)]);

    let dup = repo.create_category(NewCategory::new("hr", "HR")).await;
    assert!(matches!(dup, Err(CategoryError::DuplicateValue(v)) if v == "hr"));

    let blank = repo.create_category(NewCategory::new("", "Nothing")).await;
    assert!(matches!(blank, Err(CategoryError::InvalidCategory(_))));

    let blank_label = repo.create_category(NewCategory::new("ops", " ")).await;
    assert!(matches!(blank_label, Err(CategoryError::InvalidCategory(_))));

    let bad_patch = repo
        .update_category("hr", CategoryPatch::new().label(""))
        .await;
    assert!(matches!(bad_patch, Err(CategoryError::InvalidCategory(_))));
}
