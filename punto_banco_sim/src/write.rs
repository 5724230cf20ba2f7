use crate::{SimulationError, SimulationSummary};
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use std::io::Write;
use std::sync::mpsc::Receiver;

/// How the aggregated summaries are written out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// One entry of the JSON report, the summary plus the derived percentages.
#[derive(Serialize)]
struct SimulationReport<'a> {
    id: usize,
    #[serde(flatten)]
    summary: &'a SimulationSummary,
    win_pct: f64,
    tie_pct: f64,
    avg_winnings_per_round: f64,
    house_edge: f64,
}

fn format_summaries(
    summaries: &BTreeMap<usize, SimulationSummary>,
) -> impl Iterator<Item = String> + '_ {
    const WIDTH: usize = 80;
    summaries.iter().map(|(id, summary)| {
        let sim_num = format!("simulation #{}", id);
        let header = format!("{:-^WIDTH$}\n", sim_num);
        format!("{}{}{}\n", header, summary, "-".repeat(WIDTH))
    })
}

fn reports(summaries: &BTreeMap<usize, SimulationSummary>) -> Vec<SimulationReport<'_>> {
    summaries
        .iter()
        .map(|(&id, summary)| SimulationReport {
            id,
            summary,
            win_pct: summary.win_pct(),
            tie_pct: summary.tie_pct(),
            avg_winnings_per_round: summary.avg_winnings_per_round(),
            house_edge: summary.house_edge(),
        })
        .collect()
}

/// Receives `(Some(summary), id)` for every finished simulation and `(None, id)` once simulation `id` is done.
/// When every id in `ids` is done the summaries, merged per id, are written to `writer` in id order.
pub fn write_summaries(
    receiver: Receiver<(Option<SimulationSummary>, usize)>,
    mut ids: HashSet<usize>,
    mut writer: impl Write,
    format: OutputFormat,
) -> Result<(), SimulationError> {
    let mut summaries: BTreeMap<usize, SimulationSummary> = BTreeMap::new();
    while !ids.is_empty() {
        let (cur_summary, id) = receiver
            .recv()
            .map_err(|e| SimulationError::SendingError(e.to_string()))?;
        match cur_summary {
            Some(cur_sum) => summaries
                .entry(id)
                .or_insert_with(|| SimulationSummary::new(cur_sum.label.clone()))
                .merge(&cur_sum),
            None => {
                ids.remove(&id);
            }
        }
    }

    let written = match format {
        OutputFormat::Text => format_summaries(&summaries)
            .try_for_each(|summary_str| writer.write_all(summary_str.as_bytes())),
        OutputFormat::Json => serde_json::to_writer_pretty(&mut writer, &reports(&summaries))
            .map_err(std::io::Error::from)
            .and_then(|_| writeln!(writer)),
    };
    written
        .and_then(|_| writer.flush())
        .map_err(|e| SimulationError::WriteError(e.to_string()))
}
