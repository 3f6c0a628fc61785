use super::*;

/// Tests loading the catalog file.
///
/// Verifies that every entry is loaded and that emojis are looked up by the
/// canonical name.
///
/// Expected: Ok with all five nations
#[tokio::test]
async fn loads_catalog_file() -> Result<(), AppError> {
    let test = TestBuilder::new().with_default_catalog().build().unwrap();

    let catalog = NationCatalog::load(&test.nations_path).await?;

    assert_eq!(catalog.len(), 5);
    assert_eq!(catalog.emoji("France"), Some("🇫🇷"));
    assert_eq!(catalog.emoji("United States"), Some("🇺🇸"));
    assert!(!catalog.contains("Atlantis"));

    Ok(())
}

/// Tests that catalog names are canonicalized on load.
///
/// Expected: Ok with the title-cased key
#[tokio::test]
async fn title_cases_catalog_names() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_nation("south korea", "🇰🇷")
        .build()
        .unwrap();

    let catalog = NationCatalog::load(&test.nations_path).await?;

    assert_eq!(catalog.emoji("South Korea"), Some("🇰🇷"));
    assert_eq!(catalog.emoji("south korea"), None);

    Ok(())
}

/// Tests two catalog names that canonicalize to the same nation.
///
/// Expected: Ok with one entry, the already title-cased name wins
#[tokio::test]
async fn keeps_first_of_colliding_names() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_nation("france", "🥖")
        .with_nation("France", "🇫🇷")
        .build()
        .unwrap();

    let catalog = NationCatalog::load(&test.nations_path).await?;

    assert_eq!(catalog.len(), 1);
    assert_eq!(catalog.emoji("France"), Some("🇫🇷"));

    Ok(())
}

/// Tests loading a missing catalog file.
///
/// Expected: Err(ConfigError::ReadFile)
#[tokio::test]
async fn fails_on_missing_file() {
    let test = TestBuilder::new().build().unwrap();

    let result = NationCatalog::load(&test.dir.path().join("missing.json")).await;

    assert!(matches!(
        result,
        Err(AppError::ConfigErr(
            crate::error::config::ConfigError::ReadFile { .. }
        ))
    ));
}

/// Tests that catalog iteration is ordered by name.
#[test]
fn iterates_in_name_order() {
    let catalog = NationCatalog::from_entries([("Spain", "🇪🇸"), ("France", "🇫🇷")]);

    let names: Vec<&str> = catalog.iter().map(|(name, _)| name).collect();

    assert_eq!(names, vec!["France", "Spain"]);
}
