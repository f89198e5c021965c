//! End-to-end planning over a history file on disk.

use std::sync::Arc;

use chrono::NaiveDate;
use tempfile::TempDir;

use chore_rota::adapters::{
    FileHistoryStore, FileOutputWriter, FilePreferenceSource, HtmlNotificationRenderer,
    SvgChartRenderer,
};
use chore_rota::application::{
    PlanMode, PlanPeriodCommand, PlanPeriodError, PlanPeriodHandler, PublishPeriodCommand,
    PublishPeriodHandler,
};
use chore_rota::domain::assignment::{ActiveSet, Assignment};
use chore_rota::domain::foundation::{AgentId, ItemId};
use chore_rota::domain::preferences::PreferenceModel;
use chore_rota::domain::rotation::{CycleBaselineBuilder, RotaCalendar};
use chore_rota::ports::{PreferenceSource, StorageError};

const SHEET: &str = "\tA\tB\tC\n\
                     Dishes\t1\t2\t3\n\
                     Lawn\t2\t1\t2\n\
                     Bath\t3\t3\t1\n";

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn pairs(pairs: &[(&str, &str)]) -> Assignment {
    Assignment::from_pairs(
        pairs
            .iter()
            .map(|(a, i)| (AgentId::new(*a).unwrap(), ItemId::new(*i).unwrap())),
    )
    .unwrap()
}

async fn load_model(dir: &TempDir) -> PreferenceModel {
    let path = dir.path().join("prefs.tsv");
    std::fs::write(&path, SHEET).unwrap();
    FilePreferenceSource::new(&path)
        .load_model("Wild")
        .await
        .unwrap()
}

fn handler(store: FileHistoryStore) -> PlanPeriodHandler {
    let builder = CycleBaselineBuilder::new(
        ItemId::new("Wild").unwrap(),
        vec![ItemId::new("Lawn").unwrap()],
    );
    PlanPeriodHandler::new(Arc::new(store), builder)
}

fn command(model: &PreferenceModel, today: NaiveDate) -> PlanPeriodCommand {
    PlanPeriodCommand {
        active: ActiveSet::reconcile(model, &[], &[]).unwrap(),
        period: RotaCalendar::default().period_info(today),
        dry_run: false,
    }
}

#[tokio::test]
async fn cycle_start_then_continuation_round_trips_through_disk() {
    let dir = TempDir::new().unwrap();
    let model = load_model(&dir).await;
    let history_path = dir.path().join("history.txt");
    let store = || FileHistoryStore::new(&history_path).with_backup_date(date(2018, 1, 15));

    // Week one of the first cycle: everyone already holds their favourite
    let first = handler(store())
        .handle(&model, command(&model, date(2018, 1, 8)))
        .await
        .unwrap();
    assert_eq!(first.mode, PlanMode::FreshCycle);
    assert!(!first.improved());
    assert_eq!(
        std::fs::read_to_string(&history_path).unwrap(),
        "2018-01-08,A:Dishes,B:Lawn,C:Bath\n"
    );

    // Week two: the lawn moves on, and the two bumped housemates swap back
    let second = handler(store())
        .handle(&model, command(&model, date(2018, 1, 17)))
        .await
        .unwrap();
    assert_eq!(second.mode, PlanMode::Continuation);
    assert_eq!(second.initial, pairs(&[("A", "Lawn"), ("B", "Dishes"), ("C", "Bath")]));
    let displaced: Vec<&str> = second.displaced.agents().iter().map(|a| a.as_str()).collect();
    assert_eq!(displaced, vec!["B", "A"]);
    assert_eq!(second.trades.len(), 1);
    assert_eq!(second.trades[0].agents.len(), 2);
    assert_eq!(second.final_assignment, first.final_assignment);
    assert_eq!(second.cost_trace, vec![5.0, 3.0]);

    assert_eq!(
        std::fs::read_to_string(&history_path).unwrap(),
        "2018-01-08,A:Dishes,B:Lawn,C:Bath\n2018-01-15,A:Dishes,B:Lawn,C:Bath\n"
    );
    let backup = dir.path().join("history_bk2018-01-15.txt");
    assert_eq!(
        std::fs::read_to_string(backup).unwrap(),
        "2018-01-08,A:Dishes,B:Lawn,C:Bath\n"
    );
}

#[tokio::test]
async fn rerunning_a_week_overwrites_its_record() {
    let dir = TempDir::new().unwrap();
    let model = load_model(&dir).await;
    let history_path = dir.path().join("history.txt");

    for _ in 0..2 {
        handler(FileHistoryStore::new(&history_path).with_backup_date(date(2018, 1, 8)))
            .handle(&model, command(&model, date(2018, 1, 8)))
            .await
            .unwrap();
    }

    let text = std::fs::read_to_string(&history_path).unwrap();
    assert_eq!(text.lines().count(), 1);
}

#[tokio::test]
async fn missing_cycle_opening_falls_back_to_a_fresh_seed() {
    let dir = TempDir::new().unwrap();
    let model = load_model(&dir).await;
    let history_path = dir.path().join("history.txt");
    std::fs::write(&history_path, "2018-01-01,A:Bath,B:Dishes,C:Lawn\n").unwrap();

    let plan = handler(FileHistoryStore::new(&history_path).with_backup_date(date(2018, 1, 22)))
        .handle(&model, command(&model, date(2018, 1, 22)))
        .await
        .unwrap();

    // Reseeded as A:Dishes B:Lawn C:Bath, then the lawn moves one place on
    assert_eq!(plan.mode, PlanMode::FallbackFreshCycle);
    let displaced: Vec<&str> = plan.displaced.agents().iter().map(|a| a.as_str()).collect();
    assert_eq!(displaced, vec!["B", "C"]);
    assert_eq!(plan.initial, pairs(&[("A", "Dishes"), ("B", "Bath"), ("C", "Lawn")]));
    assert_eq!(plan.cost_trace, vec![6.0, 3.0]);

    let text = std::fs::read_to_string(&history_path).unwrap();
    assert_eq!(
        text,
        "2018-01-01,A:Bath,B:Dishes,C:Lawn\n2018-01-22,A:Dishes,B:Lawn,C:Bath\n"
    );
}

#[tokio::test]
async fn corrupt_history_stops_planning_before_anything_is_written() {
    let dir = TempDir::new().unwrap();
    let model = load_model(&dir).await;
    let history_path = dir.path().join("history.txt");
    std::fs::write(&history_path, "not a date,A:Dishes\n").unwrap();

    let err = handler(FileHistoryStore::new(&history_path))
        .handle(&model, command(&model, date(2018, 1, 8)))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        PlanPeriodError::Storage(StorageError::Corrupt(_))
    ));
    assert_eq!(
        std::fs::read_to_string(&history_path).unwrap(),
        "not a date,A:Dishes\n"
    );
}

#[tokio::test]
async fn planned_week_is_published_as_chart_and_notice() {
    let dir = TempDir::new().unwrap();
    let model = load_model(&dir).await;
    let history_path = dir.path().join("history.txt");

    for today in [date(2018, 1, 8), date(2018, 1, 15)] {
        let plan = handler(FileHistoryStore::new(&history_path).with_backup_date(today))
            .handle(&model, command(&model, today))
            .await
            .unwrap();

        let published = PublishPeriodHandler::new(
            Arc::new(SvgChartRenderer::new()),
            Arc::new(HtmlNotificationRenderer::default()),
            Arc::new(FileOutputWriter::new()),
        )
        .handle(
            &model,
            PublishPeriodCommand {
                plan,
                chart_path: dir.path().join("out").join("misery.svg"),
                notification_path: dir.path().join("out").join("email.html"),
            },
        )
        .await
        .unwrap();

        assert!(published.chart_path.exists());
        assert!(published.notification_path.exists());
    }

    let page = std::fs::read_to_string(dir.path().join("out").join("email.html")).unwrap();
    assert!(page.contains("(Week #2 of this chore cycle.)"));
    let chart = std::fs::read_to_string(dir.path().join("out").join("misery.svg")).unwrap();
    assert!(chart.starts_with("<svg"));
}
