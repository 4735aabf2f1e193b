//! Integration tests for the itinerary PDF library

use itinerary_pdf::draft::{load_draft, load_draft_into, save_draft};
use itinerary_pdf::layout::PageGeometry;
use itinerary_pdf::model::Itinerary;
use itinerary_pdf::pdf::{
    count_pages, export_pdf, extract_metadata, plan_layout, CancelToken, ExportOptions,
};
use itinerary_pdf::{Error, TextRasterizer};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn planned_pages(itinerary: &Itinerary) -> usize {
    plan_layout(itinerary, &PageGeometry::a4(), &mut TextRasterizer::new(), &CancelToken::new())
        .expect("Failed to plan layout")
        .page_count()
}

fn files_in(dir: &Path) -> usize {
    fs::read_dir(dir).unwrap().count()
}

#[test]
fn test_export_example_page_count_matches_packer() {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("singapore.pdf");
    let itinerary = Itinerary::example();

    let report = export_pdf(&itinerary, &output, &ExportOptions::default(), &CancelToken::new())
        .expect("Failed to export example");

    assert!(output.exists());
    assert_eq!(report.pages, planned_pages(&itinerary));
    assert_eq!(count_pages(&output).unwrap(), report.pages);
    assert!(report.pages > 1, "example spans several pages");
    assert_eq!(report.blocks, itinerary.blocks().len());
}

#[test]
fn test_export_metadata() {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("singapore.pdf");

    export_pdf(&Itinerary::example(), &output, &ExportOptions::default(), &CancelToken::new()).unwrap();

    let metadata = extract_metadata(&output).unwrap();
    assert_eq!(metadata.title.as_deref(), Some("Singapore Itinerary"));
    assert_eq!(metadata.author.as_deref(), Some("Vigovia Tech Pvt. Ltd"));
    assert_eq!(metadata.creator.as_deref(), Some("itinerary-pdf"));
}

#[test]
fn test_validation_blocks_export() {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("incomplete.pdf");
    let mut itinerary = Itinerary::example();
    itinerary.overview.customer_name.clear();
    itinerary.overview.departure_from = "   ".to_string();

    let result = export_pdf(&itinerary, &output, &ExportOptions::default(), &CancelToken::new());

    match result {
        Err(Error::Validation(missing)) => assert_eq!(missing, vec!["customer_name", "departure_from"]),
        other => panic!("expected validation error, got {:?}", other),
    }
    assert!(!output.exists());
    assert_eq!(files_in(temp_dir.path()), 0);
}

#[test]
fn test_cancelled_export_writes_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("cancelled.pdf");
    let cancel = CancelToken::new();
    cancel.cancel();

    let result = export_pdf(&Itinerary::example(), &output, &ExportOptions::default(), &cancel);

    assert!(matches!(result, Err(Error::Cancelled)));
    assert_eq!(files_in(temp_dir.path()), 0);
}

#[test]
fn test_export_replaces_existing_file() {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("trip.pdf");
    fs::write(&output, b"old contents").unwrap();

    export_pdf(&Itinerary::example(), &output, &ExportOptions::default(), &CancelToken::new()).unwrap();

    assert!(count_pages(&output).unwrap() > 0);
    assert_eq!(files_in(temp_dir.path()), 1);
}

#[test]
fn test_oversized_day_is_clipped_and_followed_by_new_page() {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("long-day.pdf");
    let mut itinerary = Itinerary::example();
    {
        let day = itinerary.days.get_mut(1).unwrap();
        for i in 0..120 {
            day.afternoon.push(format!("Free time at stop number {}", i + 1));
        }
    }

    let plan = plan_layout(&itinerary, &PageGeometry::a4(), &mut TextRasterizer::new(), &CancelToken::new())
        .unwrap();
    assert_eq!(plan.clipped_blocks(), 1);
    let clipped_page = plan
        .pages
        .iter()
        .position(|page| page.placements.iter().any(|p| p.clipped))
        .unwrap();
    let page = &plan.pages[clipped_page];
    assert_eq!(page.placements.len(), 1);
    let capacity = PageGeometry::a4().pack_settings().page_capacity();
    assert!((page.placements[0].height - capacity).abs() < 1e-9);

    let report = export_pdf(&itinerary, &output, &ExportOptions::default(), &CancelToken::new()).unwrap();
    assert_eq!(report.clipped, 1);
    assert_eq!(count_pages(&output).unwrap(), plan.page_count());
}

#[test]
fn test_draft_round_trip_gives_same_blocks() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("draft.json");
    let itinerary = Itinerary::example();

    save_draft(&itinerary, &path).unwrap();
    let loaded = load_draft(&path).unwrap();

    assert_eq!(loaded, itinerary);
    assert_eq!(loaded.blocks(), itinerary.blocks());
}

#[test]
fn test_malformed_draft_leaves_model_untouched() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("broken.json");
    fs::write(&path, "{ \"trip_overview\": { \"customer_name\": ").unwrap();

    let mut itinerary = Itinerary::example();
    let before = itinerary.clone();
    let result = load_draft_into(&mut itinerary, &path);

    assert!(matches!(result, Err(Error::Json(_))));
    assert_eq!(itinerary, before);

    let missing = load_draft_into(&mut itinerary, &temp_dir.path().join("missing.json"));
    assert!(matches!(missing, Err(Error::FileNotFound(_))));
    assert_eq!(itinerary, before);
}

#[test]
fn test_removed_day_renumbers_before_export() {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("short.pdf");
    let mut itinerary = Itinerary::example();
    let original_days = itinerary.days.len();
    itinerary.days.remove(0).unwrap();

    let numbers: Vec<usize> = itinerary.days.iter().map(|d| d.day_number).collect();
    let expected: Vec<usize> = (1..original_days).collect();
    assert_eq!(numbers, expected);

    let report = export_pdf(&itinerary, &output, &ExportOptions::default(), &CancelToken::new()).unwrap();
    assert_eq!(report.pages, planned_pages(&itinerary));
}
