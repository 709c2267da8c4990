//! Non-interactive subcommands writing plain text.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Result, ensure};
use chrono::{NaiveDate, Utc};
use collecto_core::{
    Bin, CollectoService, GeoPoint, Locale, ScheduleSummary, StatsError, StatsStore, StreamSummary,
    WasteType, all_tips, sorting_advice, tip_of_the_day, tips_for,
};
use tracing::warn;

use crate::cli::Command;

/// What the subcommands need besides their arguments.
pub(crate) struct Context<'ctx> {
    pub service: &'ctx CollectoService,
    pub stats_path: PathBuf,
    pub today: NaiveDate,
}

pub(crate) async fn run(command: &Command, ctx: &Context<'_>, out: &mut impl Write) -> Result<()> {
    match command {
        Command::Tui => Ok(()),
        Command::Communes => {
            for commune in ctx.service.communes() {
                writeln!(out, "{commune}")?;
            }
            Ok(())
        }
        Command::Info { commune } => {
            let commune = commune.trim();
            match ctx.service.schedule_for_commune(commune, ctx.today) {
                Some(summary) => write_schedule(out, &summary, ctx.service.locale()),
                None => {
                    writeln!(out, "No collection data for \"{commune}\".")?;
                    writeln!(out, "Run `collecto communes` to list known communes.")?;
                    Ok(())
                }
            }
        }
        Command::Near { lat, lon } => {
            let point = GeoPoint::new(*lat, *lon);
            ensure!(point.is_valid(), "coordinates {point} are out of range");
            near(ctx, point, out)
        }
        Command::Locate => match ctx.service.schedule_here(ctx.today).await {
            Some(located) => {
                writeln!(
                    out,
                    "You are in {} ({})",
                    located.reading.city, located.reading.point
                )?;
                match located.summary {
                    Some(summary) => write_schedule(out, &summary, ctx.service.locale()),
                    None => Ok(writeln!(out, "No collection zone is loaded.")?),
                }
            }
            None => {
                writeln!(
                    out,
                    "Location unavailable. Set location.latitude and location.longitude in the configuration."
                )?;
                Ok(())
            }
        },
        Command::Sort { label } => sort(ctx, &label.join(" "), out),
        Command::Tips { all } => {
            if *all {
                for tip in all_tips() {
                    writeln!(out, "[{}] {}: {}", tip.bin, tip.title, tip.text)?;
                }
            } else if let Some(tip) = tip_of_the_day(ctx.today) {
                writeln!(out, "Tip of the day ({})", tip.bin)?;
                writeln!(out, "{}", tip.title)?;
                writeln!(out, "{}", tip.text)?;
            }
            Ok(())
        }
        Command::Stats => {
            let store = StatsStore::open(ctx.stats_path.clone())?;
            let stats = store.stats();
            writeln!(out, "Items sorted: {}", stats.items_scanned)?;
            for bin in Bin::ALL {
                writeln!(out, "  {bin}: {}", stats.count_for(bin))?;
            }
            if let Some(last) = stats.last_scan {
                writeln!(out, "Last scan: {}", last.format("%Y-%m-%d %H:%M UTC"))?;
            }
            writeln!(out, "Saved in {}", store.path().display())?;
            Ok(())
        }
    }
}

fn near(ctx: &Context<'_>, point: GeoPoint, out: &mut impl Write) -> Result<()> {
    let Some((zone, distance)) = ctx.service.nearest_zone(point) else {
        writeln!(out, "No collection zone is loaded.")?;
        return Ok(());
    };
    writeln!(out, "Nearest zone: {} ({distance:.1} km)", zone.commune)?;

    if let Some(summary) = ctx.service.schedule_near(point, ctx.today) {
        write_schedule(out, &summary, ctx.service.locale())?;
    }
    Ok(())
}

fn sort(ctx: &Context<'_>, label: &str, out: &mut impl Write) -> Result<()> {
    let advice = sorting_advice(label);
    writeln!(out, "{}: {}", advice.label, advice.bin)?;
    writeln!(out, "{}", advice.hint)?;
    if let Some(tip) = tips_for(advice.bin).next() {
        writeln!(out, "Tip: {}", tip.title)?;
    }

    // counting is best effort; the advice has been given either way
    match record_scan(ctx.stats_path.clone(), advice.bin) {
        Ok(total) => writeln!(out, "Items sorted so far: {total}")?,
        Err(err) => warn!(error = %err, "could not update statistics"),
    }
    Ok(())
}

fn record_scan(path: PathBuf, bin: Bin) -> Result<u64, StatsError> {
    let mut store = StatsStore::open(path)?;
    let total = store.record(bin, Utc::now())?.items_scanned;
    Ok(total)
}

fn write_schedule(out: &mut impl Write, summary: &ScheduleSummary, locale: Locale) -> Result<()> {
    writeln!(out, "{}", summary.info.commune)?;
    write_stream(out, WasteType::HouseholdRefuse, &summary.household, locale)?;
    write_stream(out, WasteType::Recyclables, &summary.recyclables, locale)?;
    Ok(())
}

fn write_stream(
    out: &mut impl Write,
    waste_type: WasteType,
    stream: &StreamSummary,
    locale: Locale,
) -> Result<()> {
    write!(out, "  {:<17} {}", locale.stream_name(waste_type), stream.days)?;
    if let Some(passage) = stream.passage {
        write!(out, " ({})", locale.passage_name(passage))?;
    }
    if let Some(next) = stream.next {
        write!(out, ", next: {}", next.label(locale))?;
    }
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::Weekday;
    use collecto_core::{CollectionZone, Passage, WasteType, ZoneDataset, ZoneResolver};

    use super::*;

    fn service() -> CollectoService {
        let zones = vec![
            CollectionZone {
                commune: "Bordeaux".to_owned(),
                code: Some("33063".to_owned()),
                waste_type: WasteType::HouseholdRefuse,
                days: vec![Weekday::Mon, Weekday::Thu],
                passage: Passage::Night,
                point: GeoPoint::new(44.837_789, -0.579_18),
            },
            CollectionZone {
                commune: "Bordeaux".to_owned(),
                code: Some("33063".to_owned()),
                waste_type: WasteType::Recyclables,
                days: vec![Weekday::Wed],
                passage: Passage::Day,
                point: GeoPoint::new(44.84, -0.58),
            },
        ];
        CollectoService::new(Arc::new(ZoneResolver::new(ZoneDataset::from_zones(zones))))
    }

    async fn output(command: Command, stats_path: PathBuf) -> String {
        let service = service();
        let ctx = Context {
            service: &service,
            stats_path,
            // a Monday
            today: NaiveDate::from_ymd_opt(2024, 6, 3).expect("valid date"),
        };
        let mut out = Vec::new();
        run(&command, &ctx, &mut out).await.expect("command succeeds");
        String::from_utf8(out).expect("utf-8 output")
    }

    #[tokio::test]
    async fn info_prints_both_streams() {
        let text = output(
            Command::Info {
                commune: " bordeaux ".to_owned(),
            },
            PathBuf::from("unused.json"),
        )
        .await;
        assert!(text.starts_with("Bordeaux\n"), "unexpected output {text}");
        assert!(
            text.contains("Monday and Thursday (night), next: Today"),
            "unexpected output {text}"
        );
        assert!(
            text.contains("Wednesday (day), next: Wednesday"),
            "unexpected output {text}"
        );
    }

    #[tokio::test]
    async fn info_follows_the_french_locale() {
        let service = service().with_locale(Locale::French);
        let ctx = Context {
            service: &service,
            stats_path: PathBuf::from("unused.json"),
            today: NaiveDate::from_ymd_opt(2024, 6, 3).expect("valid date"),
        };
        let mut out = Vec::new();
        let command = Command::Info {
            commune: "Bordeaux".to_owned(),
        };
        run(&command, &ctx, &mut out).await.expect("command succeeds");
        let text = String::from_utf8(out).expect("utf-8 output");

        assert!(text.contains("Ordures ménagères"), "unexpected output {text}");
        assert!(
            text.contains("Lundi et Jeudi (nuit), next: Aujourd'hui"),
            "unexpected output {text}"
        );
    }

    #[tokio::test]
    async fn unknown_commune_is_reported() {
        let text = output(
            Command::Info {
                commune: "Lyon".to_owned(),
            },
            PathBuf::from("unused.json"),
        )
        .await;
        assert!(text.contains("No collection data for \"Lyon\""), "unexpected output {text}");
    }

    #[tokio::test]
    async fn near_reports_distance() {
        let text = output(
            Command::Near {
                lat: 44.837_789,
                lon: -0.579_18,
            },
            PathBuf::from("unused.json"),
        )
        .await;
        assert!(
            text.starts_with("Nearest zone: Bordeaux (0.0 km)"),
            "unexpected output {text}"
        );
    }

    #[tokio::test]
    async fn locate_without_location_service() {
        let text = output(Command::Locate, PathBuf::from("unused.json")).await;
        assert!(text.starts_with("Location unavailable"), "unexpected output {text}");
    }

    #[tokio::test]
    async fn sort_counts_items() {
        let dir = tempfile::tempdir().expect("temp dir");
        let stats_path = dir.path().join("stats.json");

        let text = output(
            Command::Sort {
                label: vec!["glass".to_owned(), "bottle".to_owned()],
            },
            stats_path.clone(),
        )
        .await;
        assert!(text.starts_with("glass bottle: Glass container"), "unexpected output {text}");
        assert!(text.contains("Items sorted so far: 1"), "unexpected output {text}");

        assert!(text.contains("Tip: "), "unexpected output {text}");

        let store = StatsStore::open(&stats_path).expect("stats saved");
        assert_eq!(store.stats().count_for(Bin::Glass), 1);

        let stats = output(Command::Stats, stats_path.clone()).await;
        assert!(stats.starts_with("Items sorted: 1\n"), "unexpected output {stats}");
        assert!(stats.contains("  Glass container: 1"), "unexpected output {stats}");
        assert!(
            stats.contains(&format!("Saved in {}", stats_path.display())),
            "unexpected output {stats}"
        );
    }

    #[tokio::test]
    async fn communes_are_listed_once() {
        let text = output(Command::Communes, PathBuf::from("unused.json")).await;
        assert_eq!(text, "Bordeaux\n");
    }
}
