//! gpv_pipeline: view orchestration for GPV schedules
//! (resolve grid → select key/day → build tables/summary → highlight → label).
//!
//! This crate is I/O-free apart from [`load::load_and_render`], which delegates
//! reading and validation to `gpv_io`. Data absences never fail a pass: a
//! missing schedule becomes an error row or an `UNKNOWN` summary, unparseable
//! labels and timestamps are skipped, a missing key falls back to `GPV1.2`.

#![forbid(unsafe_code)]

use gpv_algo::{
    current_year, reconcile_last_updated, select_key, weekday_index, TimeGrid,
};
use gpv_core::{CoreError, Fact, Preset, ScheduleDocument};
use thiserror::Error;

pub mod build_today;
pub mod build_week;
pub mod context;
pub mod highlight;
pub mod i18n;
pub mod label;
pub mod load;
pub mod model;
pub mod summarize;
mod table;

pub use build_today::build_today;
pub use build_week::build_week;
pub use context::{Lang, Mode, RenderContext, Theme, ViewTargets};
pub use highlight::{apply_highlights, update_columns};
pub use load::{load_and_render, LoadedView};
pub use model::{
    Cell, Column, DataRow, ErrorRow, IntervalView, RenderedView, Row, RowDay, SummaryView, Table,
    TableKind, ViewMetadata,
};
pub use summarize::build_summary;

/// Failures that abort a render pass.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The document could not be read or did not validate.
    #[error("data fetch failed: {0}")]
    Io(#[from] gpv_io::IoError),
    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Which sections a pass builds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Sections {
    pub today: bool,
    pub week: bool,
    pub summary: bool,
    /// Full composition also carries the "last updated" line.
    pub last_updated: bool,
}

impl Sections {
    const FULL: Sections = Sections { today: true, week: true, summary: false, last_updated: true };

    /// Explicit modes build their own sections. `auto` goes by the host
    /// targets: today + matrix means full, otherwise every present target
    /// gets its section.
    pub fn plan(mode: Mode, targets: ViewTargets) -> Sections {
        let none = Sections::default();
        match mode {
            Mode::Full => Sections::FULL,
            Mode::Emergency => Sections { today: true, ..none },
            Mode::Week => Sections { week: true, ..none },
            Mode::Summary => Sections { summary: true, ..none },
            Mode::Auto if targets.today && targets.matrix => Sections::FULL,
            Mode::Auto => Sections {
                today: targets.today,
                week: targets.matrix,
                summary: targets.summary_card,
                last_updated: false,
            },
        }
    }

    pub fn any(self) -> bool {
        self.today || self.week || self.summary
    }
}

/// One render pass over a preset/fact pair.
pub fn render(preset: &Preset, fact: &Fact, mode: Mode, ctx: &RenderContext) -> RenderedView {
    compose(preset, fact, None, mode, ctx)
}

/// Render a loaded region document; `meta.contentHash` feeds the meta line.
pub fn render_document(doc: &ScheduleDocument, mode: Mode, ctx: &RenderContext) -> RenderedView {
    compose(&doc.preset, &doc.fact, doc.content_hash(), mode, ctx)
}

fn compose(
    preset: &Preset,
    fact: &Fact,
    content_hash: Option<&str>,
    mode: Mode,
    ctx: &RenderContext,
) -> RenderedView {
    let tz = ctx.time_zone;
    let lang = ctx.lang;
    let grid = TimeGrid::resolve(&preset.time_zone);
    let choice = select_key(preset, ctx.requested_key.as_ref(), ctx.cached_key.as_ref());
    let key = choice.key;
    let active_day = ctx.requested_day.resolve(fact);
    let last = reconcile_last_updated(
        fact.update_label_text(),
        preset.update_text(),
        current_year(ctx.now_epoch, tz),
    );
    let sections = Sections::plan(mode, ctx.targets);
    tracing::debug!(
        key = %key,
        source = ?choice.source,
        mode = %mode,
        day = ?active_day,
        slots = grid.len(),
        "render pass"
    );

    let mut view = RenderedView {
        metadata: model::ViewMetadata {
            active_key: key.to_string(),
            active_day_epoch: active_day,
            last_updated_label: last.label().to_string(),
        },
        mode,
        theme: ctx.requested_theme,
        lang,
        title: i18n::t(lang, "title").to_string(),
        group_badge: (mode != Mode::Summary).then(|| label::group_badge(&key, preset, lang)),
        last_updated_line: None,
        meta_line: None,
        today: None,
        week: None,
        summary: None,
    };

    if sections.today {
        view.today = Some(build_today(preset, fact, &grid, &key, active_day, tz, lang));
    }
    if sections.week {
        let today_weekday = fact.today.and_then(|d| weekday_index(d, tz));
        view.week = Some(build_week(preset, &grid, &key, today_weekday, lang));
    }
    if sections.summary {
        view.summary = Some(build_summary(preset, fact, &grid, &key, active_day, tz, lang));
    }
    if sections.last_updated {
        view.last_updated_line = label::last_updated_line(last.label(), lang);
    }
    if sections.any() {
        view.meta_line = label::meta_line(content_hash, fact, lang);
    }

    let columns = update_columns(&grid, fact, preset);
    apply_highlights(&mut view, &columns);
    view
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auto_follows_targets() {
        let t = |today, matrix, summary_card| ViewTargets { today, matrix, summary_card };
        assert_eq!(Sections::plan(Mode::Auto, t(true, true, true)), Sections::FULL);
        let s = Sections::plan(Mode::Auto, t(true, false, false));
        assert!(s.today && !s.week && !s.summary && !s.last_updated);
        let s = Sections::plan(Mode::Auto, t(false, true, false));
        assert!(s.week && !s.today);
        let s = Sections::plan(Mode::Auto, t(false, false, true));
        assert!(s.summary && !s.today && !s.week);
    }

    #[test]
    fn auto_builds_summary_card_next_to_a_single_table() {
        let t = |today, matrix, summary_card| ViewTargets { today, matrix, summary_card };
        let s = Sections::plan(Mode::Auto, t(true, false, true));
        assert_eq!(s, Sections { today: true, week: false, summary: true, last_updated: false });
        let s = Sections::plan(Mode::Auto, t(false, true, true));
        assert_eq!(s, Sections { today: false, week: true, summary: true, last_updated: false });
        assert!(!Sections::plan(Mode::Auto, ViewTargets::NONE).any());
    }

    #[test]
    fn explicit_modes_ignore_targets() {
        let s = Sections::plan(Mode::Week, ViewTargets::NONE);
        assert!(s.week && !s.today);
        assert_eq!(Sections::plan(Mode::Full, ViewTargets::NONE), Sections::FULL);
    }

    #[test]
    fn empty_documents_still_render() {
        let ctx = RenderContext::default().with_now(1_761_775_200);
        let view = render(&Preset::default(), &Fact::default(), Mode::Full, &ctx);
        assert_eq!(view.metadata.active_key, "GPV1.2");
        assert_eq!(view.metadata.active_day_epoch, None);
        assert_eq!(view.metadata.last_updated_label, "");
        assert_eq!(view.last_updated_line, None);
        assert_eq!(view.meta_line, None);
        assert!(matches!(view.week.as_ref().map(|w| &w.rows[..]), Some([Row::Error(_)])));
        assert_eq!(view.today.as_ref().map(|t| t.rows.len()), Some(0));
    }
}
