//! Textual rendering of the node list and the lookup table, ported from
//! `maglev_show_nodes`/`maglev_show_table`/`maglev_show_table_colored` in
//! `original_source/src/maglev.c`. Purely external per spec.md §6 — none
//! of this feeds back into the core's invariants.

use colored::{Color, Colorize};

use crate::table::{MaglevTable, UNASSIGNED};

const MAX_SHOWN_SLOTS: usize = 100;

/// Deterministic palette cycled by node index. The reference picks a
/// random unused color per node at creation time; a round-robin by index
/// is equivalent for display purposes and keeps color assignment a pure
/// function of node position rather than process-global mutable state.
const PALETTE: &[Color] = &[
    Color::Red,
    Color::Green,
    Color::Yellow,
    Color::Blue,
    Color::Magenta,
    Color::Cyan,
    Color::BrightRed,
    Color::BrightGreen,
    Color::BrightYellow,
    Color::BrightBlue,
    Color::BrightMagenta,
    Color::BrightCyan,
];

fn color_for(index: usize) -> Color {
    PALETTE[index % PALETTE.len()]
}

/// `max(8, min(20, longest node name))`, matching
/// `get_max_node_name_length`.
fn field_width(table: &MaglevTable) -> usize {
    let longest = table.nodes().iter().map(|n| n.name().len()).max().unwrap_or(1);
    longest.clamp(8, 20)
}

pub fn render_nodes(table: &MaglevTable) -> String {
    let mut out = String::new();
    out.push_str(&format!("Current nodes ({} total):\n", table.node_count()));
    if table.node_count() == 0 {
        out.push_str("  (no nodes)\n");
        return out;
    }
    for (index, node) in table.nodes().iter().enumerate() {
        out.push_str(&format!("  {index}: {}\n", node.name()));
    }
    out
}

pub fn render_table(table: &MaglevTable, colored: bool) -> String {
    let mut out = String::new();
    let label = if colored { " - Colored" } else { "" };
    out.push_str(&format!(
        "Maglev lookup table (size: {}){label}:\n",
        table.size()
    ));

    if table.node_count() == 0 {
        out.push_str("  (empty - no nodes)\n");
        return out;
    }

    let counts = table.per_node_counts();
    out.push_str("Distribution summary:\n");
    for (index, node) in table.nodes().iter().enumerate() {
        let slots = counts.per_node[index];
        let pct = 100.0 * slots as f64 / table.size() as f64;
        let name = node.name().to_string();
        let name = if colored {
            name.color(color_for(index)).to_string()
        } else {
            name
        };
        out.push_str(&format!("  {name}: {slots} slots ({pct:.2}%)\n"));
    }
    if counts.unassigned > 0 {
        let pct = 100.0 * counts.unassigned as f64 / table.size() as f64;
        out.push_str(&format!(
            "  Unassigned: {} slots ({pct:.2}%)\n",
            counts.unassigned
        ));
    }

    let width = field_width(table);
    let items_per_line = if width <= 10 { 10 } else { 8 };
    let show_count = (table.size() as usize).min(MAX_SHOWN_SLOTS);

    out.push_str(&format!("\nFirst {show_count} slots:\n"));
    for i in 0..show_count {
        if i % items_per_line == 0 {
            out.push_str(&format!("\n{i:>4}: "));
        }
        match table.slots()[i] {
            UNASSIGNED => out.push_str(&format!("{:>width$} ", "-")),
            node_index => {
                let name = table.nodes()[node_index as usize].name();
                if colored {
                    out.push_str(&pad_center(name, width, color_for(node_index as usize)));
                } else {
                    out.push_str(&format!("{name:>width$} "));
                }
            }
        }
    }
    out.push('\n');

    if table.size() as usize > MAX_SHOWN_SLOTS {
        out.push_str(&format!(
            "... (showing first {MAX_SHOWN_SLOTS} out of {} total slots)\n",
            table.size()
        ));
    }

    out
}

fn pad_center(name: &str, width: usize, color: Color) -> String {
    let left = width.saturating_sub(name.len()) / 2;
    let right = width.saturating_sub(name.len()) - left;
    format!(
        "{}{}{} ",
        " ".repeat(left),
        name.color(color),
        " ".repeat(right)
    )
}
