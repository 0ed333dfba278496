use tabled::Table;

use crate::{
    config::Settings,
    curation::{self, CurateOptions, CurationReport},
    error, info, success,
    types::RankedTrackTableRow,
};

pub async fn curate(settings: &Settings, test_mode: bool, dry_run: bool) {
    if test_mode {
        info!("Test mode: reading a single followed artist");
    }

    let options = CurateOptions { test_mode, dry_run };
    let report = match curation::curate_with_options(settings, options).await {
        Ok(report) => report,
        Err(e) => error!("Curation failed. Err: {}", e),
    };

    if report.written {
        success!(
            "Running playlist rewritten with {} tracks",
            report.track_count()
        );
    } else {
        println!("{}", Table::new(table_rows(&report)));
        success!(
            "Dry run: {} tracks would be written, playlist untouched",
            report.track_count()
        );
    }
}

fn table_rows(report: &CurationReport) -> Vec<RankedTrackTableRow> {
    report
        .ranked
        .iter()
        .enumerate()
        .map(|(index, ranked)| RankedTrackTableRow {
            position: index + 1,
            name: ranked.track.name.clone(),
            artists: ranked
                .track
                .artists
                .iter()
                .map(|a| a.name.as_str())
                .collect::<Vec<_>>()
                .join(", "),
            popularity: ranked
                .track
                .popularity
                .map(|p| p.to_string())
                .unwrap_or_else(|| "-".to_string()),
            score: format!("{:.1}", ranked.score),
        })
        .collect()
}
