// energy.rs - Per-construct energy table loading

use std::path::Path;

/// The three scalar energy metrics measured per construct
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnergyMetric {
    Left,
    Right,
    Total,
}

impl EnergyMetric {
    pub const ALL: [EnergyMetric; 3] = [EnergyMetric::Left, EnergyMetric::Right, EnergyMetric::Total];

    /// Column name in the energy table files
    pub fn column_name(self) -> &'static str {
        match self {
            EnergyMetric::Left => "EnergyLeft",
            EnergyMetric::Right => "EnergyRight",
            EnergyMetric::Total => "Energy",
        }
    }

    pub fn index(self) -> usize {
        match self {
            EnergyMetric::Left => 0,
            EnergyMetric::Right => 1,
            EnergyMetric::Total => 2,
        }
    }
}

/// One row of an energy table
///
/// Values that were missing or non-numeric in the file are stored as NaN and
/// excluded per metric downstream.
#[derive(Debug, Clone)]
pub struct EnergyRow {
    pub construct_id: String,
    pub energy_left: f64,
    pub energy_right: f64,
    pub energy: f64,
}

impl EnergyRow {
    pub fn metric(&self, metric: EnergyMetric) -> f64 {
        match metric {
            EnergyMetric::Left => self.energy_left,
            EnergyMetric::Right => self.energy_right,
            EnergyMetric::Total => self.energy,
        }
    }
}

/// Energy table for one file: one row per construct, in file order
///
/// Row order is load-bearing: reference and alternative tables are joined by
/// ordinal position, not by ConstructID.
#[derive(Debug, Clone)]
pub struct EnergyTable {
    pub rows: Vec<EnergyRow>,
}

fn parse_energy_value(field: &str) -> f64 {
    let cleaned = field.trim();
    if cleaned.is_empty() || cleaned == "NA" {
        return f64::NAN;
    }
    cleaned.parse::<f64>().unwrap_or(f64::NAN)
}

impl EnergyTable {
    /// Load an energy table from CSV
    ///
    /// The file must carry at minimum the `ConstructID`, `EnergyLeft`,
    /// `EnergyRight` and `Energy` columns; extra columns are ignored.
    pub fn from_csv(path: &Path) -> Result<Self, String> {
        let mut reader = csv::Reader::from_path(path)
            .map_err(|e| format!("Failed to open energy table '{}': {}", path.display(), e))?;

        let headers = reader
            .headers()
            .map_err(|e| format!("Failed to read header of '{}': {}", path.display(), e))?
            .clone();

        let column = |name: &str| -> Result<usize, String> {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or_else(|| format!("Missing column '{}' in '{}'", name, path.display()))
        };

        let id_col = column("ConstructID")?;
        let left_col = column(EnergyMetric::Left.column_name())?;
        let right_col = column(EnergyMetric::Right.column_name())?;
        let total_col = column(EnergyMetric::Total.column_name())?;

        let mut rows = Vec::new();
        for (row_num, result) in reader.records().enumerate() {
            let record = result.map_err(|e| {
                format!(
                    "Failed to parse line {} of '{}': {}",
                    row_num + 2,
                    path.display(),
                    e
                )
            })?;

            let field = |idx: usize| record.get(idx).unwrap_or("");
            rows.push(EnergyRow {
                construct_id: field(id_col).trim().to_string(),
                energy_left: parse_energy_value(field(left_col)),
                energy_right: parse_energy_value(field(right_col)),
                energy: parse_energy_value(field(total_col)),
            });
        }

        Ok(Self { rows })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
