//! Printable export: a static HTML document with one page per group.

use crate::models::{BracketView, Match, Player};
use html_escape::encode_text;
use std::fmt::Write;

const PRINT_STYLE: &str = "\
@page { size: A4 portrait; margin: 1cm; }
* { margin: 0; padding: 0; box-sizing: border-box; }
body { font-family: Arial, sans-serif; font-size: 11px; color: #000; background: #fff; }
.page { width: 100%; padding: 15px; }
.header { text-align: center; margin-bottom: 20px; padding: 15px; border: 2px solid #000; background: #f5f5f5; }
.header h1 { font-size: 18px; text-transform: uppercase; }
.bracket { display: flex; justify-content: space-between; gap: 15px; }
.round { flex: 1; display: flex; flex-direction: column; }
.round-title { background: #4a90e2; color: #fff; padding: 8px; text-align: center; font-weight: bold; text-transform: uppercase; margin-bottom: 15px; }
.matches { display: flex; flex-direction: column; justify-content: space-around; flex: 1; gap: 10px; }
.match { border: 1px solid #ccc; border-radius: 5px; }
.match-header { background: #666; color: #fff; padding: 4px; text-align: center; font-size: 9px; }
.player-row { display: flex; justify-content: space-between; padding: 3px 8px; min-height: 18px; }
.score-box { border: 1px solid #ccc; width: 25px; height: 16px; }
.vs { text-align: center; color: #999; font-size: 8px; }
.page-break { page-break-after: always; }
";

/// Weight span of the real players of a group: `"48kg"`, `"45-52.5kg"`, or empty.
pub fn weight_label<'a>(players: impl IntoIterator<Item = &'a Player>) -> String {
    let weights: Vec<f64> = players
        .into_iter()
        .filter(|p| !p.is_bye() && p.weight > 0.0)
        .map(|p| p.weight)
        .collect();
    if weights.is_empty() {
        return String::new();
    }
    let min = weights.iter().copied().fold(f64::INFINITY, f64::min);
    let max = weights.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if min == max {
        format!("{}kg", min)
    } else {
        format!("{}-{}kg", min, max)
    }
}

/// Full document for all groups of a category. Empty brackets get no page.
pub fn render_printable(category_name: &str, views: &[BracketView]) -> String {
    let printable: Vec<&BracketView> = views.iter().filter(|v| !v.is_empty()).collect();
    let pages: Vec<String> = printable
        .iter()
        .map(|v| render_group_page(category_name, v, printable.len()))
        .collect();

    let mut html = String::new();
    let _ = write!(
        html,
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"UTF-8\">\n<title>{} - Taekwondo tournament</title>\n<style>\n{}</style>\n</head>\n<body>\n",
        encode_text(category_name),
        PRINT_STYLE
    );
    html.push_str(&pages.join("<div class=\"page-break\"></div>\n"));
    html.push_str("</body>\n</html>\n");
    html
}

fn render_group_page(category_name: &str, view: &BracketView, total_groups: usize) -> String {
    let title = format!("{} {}", category_name, weight_label(view.real_players()));
    let mut page = String::new();
    let _ = write!(
        page,
        "<div class=\"page\">\n<div class=\"header\"><h1>{}</h1><div>Bracket - Group {} of {}</div></div>\n<div class=\"bracket\">\n",
        encode_text(title.trim()),
        view.group_index + 1,
        total_groups
    );
    for round in &view.round_numbers {
        let _ = write!(
            page,
            "<div class=\"round\">\n<div class=\"round-title\">{}</div>\n<div class=\"matches\">\n",
            encode_text(&view.round_name(*round))
        );
        for m in view.rounds.get(round).into_iter().flatten() {
            page.push_str(&render_match(m));
        }
        page.push_str("</div>\n</div>\n");
    }
    page.push_str("</div>\n</div>\n");
    page
}

fn render_match(m: &Match) -> String {
    format!(
        "<div class=\"match\"><div class=\"match-header\">MATCH {}</div>\
<div class=\"player-row\"><span>{}</span><div class=\"score-box\"></div></div>\
<div class=\"vs\">VS</div>\
<div class=\"player-row\"><span>{}</span><div class=\"score-box\"></div></div></div>\n",
        m.position + 1,
        encode_text(printed_name(m.player1.as_ref())),
        encode_text(printed_name(m.player2.as_ref())),
    )
}

/// Blank for undetermined slots and byes.
fn printed_name(player: Option<&Player>) -> &str {
    match player {
        Some(p) if !p.is_bye() => &p.name,
        _ => "",
    }
}
