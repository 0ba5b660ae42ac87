//! Human-readable dump of decoded frame tables.

use std::fmt::Write as _;

use frametable_core::Colors;

use crate::reader::{CodeAddress, FunctionTable, SafePointEntry};

/// Render decoded tables, one block per function.
pub fn dump(tables: &[FunctionTable], colors: Colors) -> String {
    let mut out = String::new();
    for (i, table) in tables.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        dump_table(&mut out, table, colors);
    }
    out
}

fn dump_table(out: &mut String, table: &FunctionTable, c: Colors) {
    writeln!(
        out,
        "{}  {}; @{}{}",
        c.paint_symbol(&table.function),
        c.dim,
        table.offset,
        c.reset
    )
    .unwrap();

    writeln!(out, "  callee_saves = {}", c.paint_value(table.callee_saves.len())).unwrap();
    for save in &table.callee_saves {
        writeln!(
            out,
            "    reg {} @ {}",
            c.paint_value(save.register),
            c.paint_value(save.stack_offset)
        )
        .unwrap();
    }

    let count = table.safe_points.len();
    writeln!(out, "  safe_points = {}", c.paint_value(count)).unwrap();
    let w = index_width(count);
    for (i, point) in table.safe_points.iter().enumerate() {
        dump_safe_point(out, i, w, point, c);
    }
}

fn dump_safe_point(out: &mut String, index: usize, w: usize, point: &SafePointEntry, c: Colors) {
    writeln!(
        out,
        "    #{index:0w$} {} {}→ @{}{}",
        c.paint_symbol(&format_address(&point.address)),
        c.dim,
        point.body_offset,
        c.reset
    )
    .unwrap();
    writeln!(out, "      stack  {}", format_list(&point.stack_offsets, c)).unwrap();
    writeln!(out, "      regs   {}", format_list(&point.registers, c)).unwrap();
    writeln!(out, "      spaces {}", format_list(&point.address_spaces, c)).unwrap();
}

fn format_address(address: &CodeAddress) -> String {
    match address {
        CodeAddress::Symbol { name, addend: 0 } => name.clone(),
        CodeAddress::Symbol { name, addend } => format!("{name}{addend:+}"),
        CodeAddress::Local { section, offset } => format!("{}+{offset}", section.name()),
        CodeAddress::Absolute(value) => format!("{value:#x}"),
    }
}

fn format_list<T: std::fmt::Display>(items: &[T], c: Colors) -> String {
    let parts: Vec<_> = items.iter().map(|item| c.paint_value(item)).collect();
    format!("[{}]", parts.join(", "))
}

/// Digits needed to print indices `0..count`.
fn index_width(count: usize) -> usize {
    let mut max = count.saturating_sub(1);
    let mut width = 1;
    while max >= 10 {
        max /= 10;
        width += 1;
    }
    width
}
