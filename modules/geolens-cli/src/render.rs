// Plain-terminal rendering of a finished report. Every section beyond the
// scores is optional on the wire; each renders independently or not at all.

use console::{style, StyledObject};

use geolens_common::{Report, ScoreCard};

pub fn report(report: &Report) {
    println!();
    println!("{}", style("GEO Analysis Report").bold().underlined());
    println!("{}", style(&report.url).cyan());
    if let Some(created) = report.created_at {
        println!("{}", style(created.format("%Y-%m-%d %H:%M UTC")).dim());
    }
    println!();

    println!(
        "Global score: {}",
        colored_score(report.scores.global_score)
    );
    println!();
    scores(&report.scores);

    if let Some(summary) = &report.executive_summary {
        println!();
        println!("{}", style("Executive summary").bold());
        println!("{}", summary.global_assessment);
        for issue in &summary.critical_issues {
            println!("  {} {issue}", style("✗").red());
        }
        for opportunity in &summary.key_opportunities {
            println!("  {} {opportunity}", style("→").green());
        }
    }

    if !report.recommendations.is_empty() {
        println!();
        println!("{}", style("Recommendations").bold());
        for rec in &report.recommendations {
            println!(
                "  {}. {} ({} impact, {} effort)",
                rec.priority,
                style(&rec.title).bold(),
                rec.impact,
                rec.effort
            );
            println!("     {}", rec.description);
        }
    }

    if !report.quick_wins.is_empty() {
        println!();
        println!("{}", style("Quick wins").bold());
        for win in &report.quick_wins {
            println!(
                "  {} {} ({}, {})",
                style("•").green(),
                style(&win.title).bold(),
                win.impact,
                win.time_required
            );
        }
    }

    if let Some(competitive) = &report.competitive_intelligence {
        let competitors = competitive
            .get("competitors_analyzed")
            .and_then(|v| v.as_u64())
            .unwrap_or(0);
        if competitors > 0 {
            println!();
            println!(
                "{} {competitors} competitors analyzed — see the dashboard export",
                style("Competitive intelligence:").bold()
            );
        }
    }

    if let Some(schemas) = report.schemas.as_ref().and_then(|s| s.as_object()) {
        let generated = schemas
            .keys()
            .filter(|k| *k != "implementation_guide" && *k != "error")
            .count();
        if generated > 0 {
            println!();
            println!(
                "{} {generated} JSON-LD schema types generated — see the docx export",
                style("Schema markup:").bold()
            );
        }
    }
    println!();
}

fn scores(card: &ScoreCard) {
    let rows = [
        ("Structure & formatting", card.structure),
        ("Information density", card.info_density),
        ("Machine readability", card.readability),
        ("E-E-A-T", card.eeat),
        ("Educational content", card.educational),
        ("Thematic organization", card.thematic),
        ("AI optimization", card.ai_optimization),
        ("Current visibility", card.visibility),
    ];
    for (label, value) in rows {
        println!("  {label:<24} {}", colored_score(value));
    }
}

fn colored_score(value: f64) -> StyledObject<String> {
    let text = format!("{value:.1}/10");
    if value >= 7.0 {
        style(text).green()
    } else if value >= 5.0 {
        style(text).yellow()
    } else {
        style(text).red()
    }
}
