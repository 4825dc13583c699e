use comfy_table::{ContentArrangement, Table};

use wb_engine::DieKind;

pub fn run() -> Result<(), String> {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Die", "Sides"]);

    for kind in DieKind::ALL {
        table.add_row(vec![kind.to_string(), kind.sides().to_string()]);
    }

    println!("{table}");
    Ok(())
}
