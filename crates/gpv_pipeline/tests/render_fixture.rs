//! Integration tests over the shared Kyiv fixture.

use std::path::PathBuf;

use gpv_algo::DaySelector;
use gpv_core::{DocumentMeta, ScheduleDocument};
use gpv_pipeline::{
    load_and_render, render_document, Mode, PipelineError, RenderContext, Row, ViewTargets,
};

const THU: i64 = 1_761_775_200; // 2025-10-30 00:00 Kyiv
const FRI: i64 = THU + 86_400;

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../fixtures/kyiv-region.json")
}

fn fixture() -> ScheduleDocument {
    gpv_io::loader::load_document(&fixture_path())
        .expect("fixture loads")
        .document
}

fn ctx() -> RenderContext {
    RenderContext::default().with_now(THU + 12 * 3600)
}

#[test]
fn full_view_of_first_group() {
    let doc = fixture();
    let view = render_document(&doc, Mode::Full, &ctx());

    assert_eq!(view.metadata.active_key, "GPV1.1");
    assert_eq!(view.metadata.active_day_epoch, Some(THU));
    assert_eq!(view.metadata.last_updated_label, "30.10.2025 21:51");
    assert_eq!(view.group_badge.as_deref(), Some("Черга: 1.1"));
    assert_eq!(
        view.last_updated_line.as_deref(),
        Some("Дата та час останнього оновлення інформації на графіку: 30.10.2025 21:51")
    );
    assert_eq!(view.meta_line.as_deref(), Some("Оновлено: 30.10.2025 21:51"));
    assert!(view.summary.is_none());

    let today = view.today.as_ref().expect("today table");
    let labels: Vec<&str> = today
        .rows
        .iter()
        .filter_map(|r| match r {
            Row::Data(d) => Some(d.label.as_str()),
            Row::Error(_) => None,
        })
        .collect();
    assert_eq!(labels, ["Сьогодні", "Завтра (31.10)"]);

    let week = view.week.as_ref().expect("week table");
    assert_eq!(week.rows.len(), 7);
    let emphasized: Vec<usize> = week
        .rows
        .iter()
        .enumerate()
        .filter(|(_, r)| matches!(r, Row::Data(d) if d.is_today))
        .map(|(i, _)| i)
        .collect();
    assert_eq!(emphasized, [3]);
}

#[test]
fn update_columns_are_marked_in_every_table() {
    let view = render_document(&fixture(), Mode::Full, &ctx());
    for table in view.tables() {
        let marked: Vec<usize> = table
            .columns
            .iter()
            .enumerate()
            .filter(|(_, c)| c.update)
            .map(|(i, _)| i)
            .collect();
        assert_eq!(marked, [8, 21], "{:?}", table.kind);
        for row in &table.rows {
            if let Row::Data(d) = row {
                assert!(d.cells[21].update && d.cells[8].update && !d.cells[0].update);
            }
        }
    }
}

#[test]
fn summary_for_today() {
    let view = render_document(&fixture(), Mode::Summary, &ctx());
    assert!(view.group_badge.is_none());
    assert!(view.today.is_none() && view.week.is_none());
    let s = view.summary.expect("summary");
    assert_eq!(s.status, "OFF");
    let texts: Vec<&str> = s.intervals.iter().map(|i| i.text.as_str()).collect();
    assert_eq!(texts, ["з 06:00 до 08:30", "з 18:30 до 20:00"]);
    assert_eq!(s.group_number.as_deref(), Some("1.1"));
}

#[test]
fn summary_for_tomorrow_of_another_group() {
    let ctx = ctx()
        .with_key("GPV1.2".parse().unwrap())
        .with_day(DaySelector::Tomorrow);
    let view = render_document(&fixture(), Mode::Summary, &ctx);
    assert_eq!(view.metadata.active_day_epoch, Some(FRI));
    let s = view.summary.expect("summary");
    assert_eq!(s.date_line.as_deref(), Some("Завтра (31.10),"));
    let texts: Vec<&str> = s.intervals.iter().map(|i| i.text.as_str()).collect();
    assert_eq!(texts, ["з 09:00 до 12:00"]);
}

#[test]
fn group_without_fact_is_unknown() {
    let ctx = ctx().with_key("GPV2.1".parse().unwrap());
    let s = render_document(&fixture(), Mode::Summary, &ctx).summary.expect("summary");
    assert_eq!(s.status, "UNKNOWN");
    assert_eq!(s.status_badge, "OFF");
    assert_eq!(s.placeholder.as_deref(), Some("—"));
}

#[test]
fn unknown_key_falls_back_to_first_group() {
    let ctx = ctx().with_key("GPV7.7".parse().unwrap());
    let view = render_document(&fixture(), Mode::Week, &ctx);
    assert_eq!(view.metadata.active_key, "GPV1.1");
    assert!(view.today.is_none());
    assert!(view.last_updated_line.is_none());
}

#[test]
fn auto_mode_uses_targets() {
    let targets = ViewTargets { today: true, matrix: false, summary_card: false };
    let view = render_document(&fixture(), Mode::Auto, &ctx().with_targets(targets));
    assert!(view.today.is_some() && view.week.is_none());
    assert!(view.last_updated_line.is_none());
    assert!(view.meta_line.is_some());

    let view = render_document(&fixture(), Mode::Auto, &ctx().with_targets(ViewTargets::NONE));
    assert!(view.is_empty());
    assert!(view.meta_line.is_none());
    assert_eq!(view.metadata.last_updated_label, "30.10.2025 21:51");
}

#[test]
fn content_hash_wins_the_meta_line() {
    let mut doc = fixture();
    doc.meta = Some(DocumentMeta { content_hash: Some("abc123".into()) });
    let view = render_document(&doc, Mode::Emergency, &ctx());
    assert_eq!(view.meta_line.as_deref(), Some("contentHash: abc123"));
}

#[test]
fn view_serializes_with_camel_case_metadata() {
    let view = render_document(&fixture(), Mode::Emergency, &ctx());
    let v = serde_json::to_value(&view).unwrap();
    assert_eq!(v["metadata"]["activeKey"], "GPV1.1");
    assert_eq!(v["metadata"]["activeDayEpoch"], THU);
    assert_eq!(v["mode"], "emergency");
    assert_eq!(v["today"]["rows"][0]["kind"], "data");
    assert_eq!(v["today"]["rows"][0]["day"]["type"], "epoch");
}

#[test]
fn load_and_render_reports_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_and_render(&dir.path().join("absent.json"), Mode::Full, &ctx()).unwrap_err();
    assert!(matches!(err, PipelineError::Io(_)));
}

#[test]
fn load_and_render_fixture() {
    let out = load_and_render(&fixture_path(), Mode::Full, &ctx()).unwrap();
    assert_eq!(out.loaded.region_id, "kyiv-region");
    assert_eq!(out.loaded.source_sha256.len(), 64);
    assert_eq!(out.view.metadata.active_key, "GPV1.1");
}
