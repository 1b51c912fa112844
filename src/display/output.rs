use crate::analysis::coach::CoachReport;
use crate::analysis::pick::Pick;
use crate::draft::format::{Side, Strategy};
use crate::draft::session::DraftSession;
use colored::*;
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
struct SuggestionRow {
    rank: String,
    hero: String,
    #[tabled(rename = "blue odds")]
    odds: String,
}

#[derive(Tabled)]
struct CoachRow {
    hero: String,
    rank: String,
    #[tabled(rename = "blue odds")]
    odds: String,
}

#[derive(Tabled)]
struct RosterRow {
    side: String,
    heroes: String,
}

fn side_label(side: Side) -> ColoredString {
    match side {
        Side::Blue => "BLUE".blue().bold(),
        Side::Red => "RED".red().bold(),
    }
}

fn odds_cell(score: f64) -> String {
    let text = format!("{:.1}%", score * 100.0);
    if score >= 0.5 {
        text.green().to_string()
    } else {
        text.red().to_string()
    }
}

/// The phase header plus the top `limit` options for whoever acts.
pub fn display_suggestions(session: &DraftSession, picks: &[Pick], limit: usize) {
    let (Some(phase), Some(side)) = (session.current_phase(), session.acting_side()) else {
        return;
    };
    let intent = match session.current_strategy() {
        Some(Strategy::Pick) => "pick",
        Some(Strategy::DefensiveBan) => "defensive ban",
        Some(Strategy::OffensiveBan) => "offensive ban",
        None => "",
    };

    println!(
        "\n{} {} ({} {}, phase {}/{})",
        "🎮".cyan(),
        phase.to_string().bold(),
        side_label(side),
        intent,
        session.phase_index() + 1,
        session.format().len()
    );
    println!("{}", "=".repeat(60).cyan());

    if picks.is_empty() {
        println!("{}", "No options left in the pool".yellow());
        return;
    }

    let rows: Vec<SuggestionRow> = picks
        .iter()
        .take(limit)
        .enumerate()
        .map(|(idx, pick)| SuggestionRow {
            rank: format!("#{}", idx + 1),
            hero: pick.hero().to_string(),
            odds: odds_cell(pick.score()),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}", table);

    if picks.len() > limit {
        println!("  … and {} more", picks.len() - limit);
    }
}

pub fn display_rosters(session: &DraftSession) {
    let names = |heroes: &[crate::draft::hero::Hero]| -> String {
        if heroes.is_empty() {
            "-".to_string()
        } else {
            heroes
                .iter()
                .map(|h| h.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        }
    };
    let rows = vec![
        RosterRow {
            side: side_label(Side::Blue).to_string(),
            heroes: names(session.blue().heroes()),
        },
        RosterRow {
            side: side_label(Side::Red).to_string(),
            heroes: names(session.red().heroes()),
        },
        RosterRow {
            side: "BANNED".yellow().bold().to_string(),
            heroes: names(session.banned()),
        },
    ];
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}", table);
}

pub fn display_final_odds(session: &DraftSession, odds: f64) {
    println!("\n{}", "📊 FINAL DRAFT".bold().cyan());
    println!("{}", "=".repeat(60).cyan());
    display_rosters(session);
    println!(
        "{} {}\n",
        "Blue win probability:".bold(),
        odds_cell(odds)
    );
}

pub fn display_coach_report(report: &CoachReport) {
    println!(
        "\n{}",
        format!("🧭 Coach report ({})", report.format).bold().cyan()
    );
    println!("{}", "=".repeat(60).cyan());

    if report.ranks.is_empty() {
        println!("{}", "Draft is complete".yellow());
    } else {
        let rows: Vec<CoachRow> = report
            .ranks
            .iter()
            .map(|r| CoachRow {
                hero: r.hero.to_string(),
                rank: format!("{}/10", r.rank),
                odds: odds_cell(r.score),
            })
            .collect();
        let mut table = Table::new(rows);
        table.with(Style::rounded());
        println!("{}", table);

        println!("\n{}", "Interpretation".bold().yellow());
        println!("• Rank: 10 is the strongest option for the side about to act");
        println!("• Blue odds: the search's estimate once that option is taken");
    }

    println!("\n{} {}%\n", "Blue odds:".bold(), report.odds);
}

pub fn display_error(error: &str) {
    eprintln!("{} {}", "❌ Error:".red().bold(), error);
}

pub fn display_info(message: &str) {
    println!("{} {}", "ℹ️".cyan(), message);
}

pub fn display_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}
