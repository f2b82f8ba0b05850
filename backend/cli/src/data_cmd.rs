//! `paddock circuits` / `paddock teams`: the reference data as tables.

use crate::terminal_output::{render_table, Column};

pub fn circuits() {
    let mut rows: Vec<Vec<String>> = paddock_racing::circuits()
        .iter()
        .map(|c| {
            vec![
                c.key.to_string(),
                c.name.to_string(),
                c.country.to_string(),
                format!("{:.3}", c.length_km),
                c.corners.to_string(),
                format!("{:?}", c.difficulty),
            ]
        })
        .collect();
    rows.sort();
    let columns = [
        Column::left("Key"),
        Column::left("Name"),
        Column::left("Country"),
        Column::right("Km"),
        Column::right("Corners"),
        Column::left("Difficulty"),
    ];
    print!("{}", render_table(&columns, &rows));
}

pub fn teams() {
    let rows: Vec<Vec<String>> = paddock_racing::teams()
        .iter()
        .map(|t| {
            vec![
                t.key.to_string(),
                t.name.to_string(),
                t.drivers.join(", "),
                t.engine.to_string(),
            ]
        })
        .collect();
    let columns = [
        Column::left("Key"),
        Column::left("Name"),
        Column::left("Drivers"),
        Column::left("Engine"),
    ];
    print!("{}", render_table(&columns, &rows));
}
