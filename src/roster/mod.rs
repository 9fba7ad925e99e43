//! Roster spreadsheet: extraction and the read-only views built on it.

pub mod extract;
pub mod views;

pub use extract::load_roster;

#[cfg(test)]
pub mod fixtures {
    use std::path::{Path, PathBuf};

    use calamine::{Cell as SheetCell, Data, Range};
    use rust_xlsxwriter::Workbook;

    const WIDTH: usize = 20;

    #[derive(Debug, Clone)]
    pub enum Cell {
        Blank,
        Text(&'static str),
        Number(f64),
    }

    /// A 20-column roster row. Deduction columns hold `base * 1 ..= base * 14`.
    pub fn row(no: &'static str, unit: Cell, jabatan: &'static str, base: i64) -> Vec<Cell> {
        let mut cells = vec![Cell::Blank; WIDTH];
        cells[1] = match no {
            "" => Cell::Blank,
            n => n.parse::<f64>().map(Cell::Number).unwrap_or(Cell::Text(no)),
        };
        cells[2] = Cell::Number(1_000_000_000.0 + base as f64);
        cells[3] = Cell::Number(2_000_000_000.0 + base as f64);
        cells[4] = unit;
        cells[5] = if jabatan.is_empty() { Cell::Blank } else { Cell::Text(jabatan) };
        for i in 0..14 {
            cells[6 + i] = Cell::Number((base * (i as i64 + 1)) as f64);
        }
        cells
    }

    pub fn sheet(rows: &[(u32, Vec<Cell>)]) -> Range<Data> {
        let cells = rows
            .iter()
            .flat_map(|(r, row)| {
                row.iter().enumerate().filter_map(move |(c, cell)| {
                    let value = match cell {
                        Cell::Blank => return None,
                        Cell::Text(s) => Data::String(s.to_string()),
                        Cell::Number(n) => Data::Float(*n),
                    };
                    Some(SheetCell::new((*r, c as u32), value))
                })
            })
            .collect();
        Range::from_sparse(cells)
    }

    /// Banner rows, a repeated header, a separator row, forward-filled units,
    /// a "0" position and one row with an unreadable amount.
    pub fn sample_rows() -> Vec<(u32, Vec<Cell>)> {
        let mut banner = vec![Cell::Blank; WIDTH];
        banner[1] = Cell::Text("DAFTAR POTONGAN KETERLAMBATAN");

        let mut separator = row("", Cell::Blank, "", 0);
        separator[2] = Cell::Text("0");

        let mut unreadable = row("6", Cell::Blank, "Supir", 100);
        unreadable[8] = Cell::Text("n/a");

        vec![
            (0, banner),
            (6, row("NO", Cell::Text("UNIT"), "JABATAN", 0)),
            (8, row("1", Cell::Text("Cabang A"), "Teller", 1000)),
            (9, row("2", Cell::Blank, "Satpam", 500)),
            (10, row("NO", Cell::Text("UNIT"), "JABATAN", 0)),
            (11, separator),
            (12, row("3", Cell::Text("0"), "Teller", 1000)),
            (13, row("4", Cell::Text("Cabang B"), "Kasir", 750)),
            (14, row("5", Cell::Blank, "0", 750)),
            (15, unreadable),
            (16, row("7", Cell::Text("Kantor Pusat"), "Manajer", 2000)),
        ]
    }

    pub fn sample_range() -> Range<Data> {
        sheet(&sample_rows())
    }

    pub fn write_sample_workbook(dir: &Path) -> PathBuf {
        let path = dir.join("Pot Keterlambatan.xlsx");
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();

        for (r, row) in sample_rows() {
            for (c, cell) in row.into_iter().enumerate() {
                match cell {
                    Cell::Blank => {}
                    Cell::Text(s) => {
                        worksheet.write_string(r, c as u16, s).unwrap();
                    }
                    Cell::Number(n) => {
                        worksheet.write_number(r, c as u16, n).unwrap();
                    }
                }
            }
        }

        workbook.save(&path).unwrap();
        path
    }
}
