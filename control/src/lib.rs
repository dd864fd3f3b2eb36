use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use thiserror::Error;
use tracing::info;
use xcunits::{EnergyUnit, LengthUnit, UnitError, UnitSystem};

#[derive(Debug, Error)]
pub enum ControlError {
    #[error("cannot read '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("line {line}: expected 'key = value', got '{text}'")]
    Malformed { line: usize, text: String },

    #[error("line {line}: unknown parameter '{key}'")]
    UnknownParameter { line: usize, key: String },

    #[error("line {line}: invalid value '{value}' for {key}")]
    InvalidValue {
        line: usize,
        key: String,
        value: String,
    },

    #[error(transparent)]
    Unit(#[from] UnitError),
}

pub type Result<T> = std::result::Result<T, ControlError>;

#[derive(Debug, Clone, PartialEq)]
pub struct Control {
    verbosity: String, // low, high

    xc_backend: String,  // builtin, libxc
    spin_scheme: String, // auto, spin, nonspin

    dens_threshold: f64,

    input_energy_unit: EnergyUnit,
    input_length_unit: LengthUnit,
}

impl Default for Control {
    fn default() -> Self {
        Control {
            verbosity: "low".to_string(),
            xc_backend: "builtin".to_string(),
            spin_scheme: "auto".to_string(),
            dens_threshold: 1.0E-15,
            input_energy_unit: EnergyUnit::Hartree,
            input_length_unit: LengthUnit::Bohr,
        }
    }
}

impl Control {
    pub fn new() -> Control {
        Control::default()
    }

    pub fn get_verbosity(&self) -> &str {
        &self.verbosity
    }

    pub fn is_verbose(&self) -> bool {
        "high" == self.get_verbosity()
    }

    pub fn get_xc_backend(&self) -> &str {
        &self.xc_backend
    }

    pub fn get_spin_scheme(&self) -> &str {
        &self.spin_scheme
    }

    /// `None` means infer polarization from the density shape.
    pub fn get_spin_polarized(&self) -> Option<bool> {
        match self.get_spin_scheme() {
            "spin" => Some(true),
            "nonspin" => Some(false),
            _ => None,
        }
    }

    pub fn get_dens_threshold(&self) -> f64 {
        self.dens_threshold
    }

    pub fn get_input_units(&self) -> UnitSystem {
        UnitSystem::new(self.input_energy_unit, self.input_length_unit)
    }

    pub fn read_file<P: AsRef<Path>>(&mut self, inpfile: P) -> Result<()> {
        let path = inpfile.as_ref();

        let lines = read_file_data_to_vec(path).map_err(|source| ControlError::Io {
            path: path.display().to_string(),
            source,
        })?;

        self.read_lines(&lines)
    }

    /// Applies the defaults, then every `key = value` line on top of them.
    pub fn read_lines<S: AsRef<str>>(&mut self, lines: &[S]) -> Result<()> {
        *self = Control::default();

        for (i, raw) in lines.iter().enumerate() {
            let line = i + 1;

            let text = match raw.as_ref().split('#').next() {
                Some(t) => t.trim(),
                None => continue,
            };

            if text.is_empty() {
                continue;
            }

            let s: Vec<&str> = text.split('=').map(|x| x.trim()).collect();

            if s.len() != 2 || s[0].is_empty() {
                return Err(ControlError::Malformed {
                    line,
                    text: text.to_string(),
                });
            }

            let (key, value) = (s[0], s[1]);

            let invalid = || ControlError::InvalidValue {
                line,
                key: key.to_string(),
                value: value.to_string(),
            };

            match key {
                "verbosity" => {
                    self.verbosity = one_of(value, &["low", "high"]).ok_or_else(invalid)?;
                }

                "xc_backend" => {
                    self.xc_backend = one_of(value, &["builtin", "libxc"]).ok_or_else(invalid)?;
                }

                "spin_scheme" => {
                    self.spin_scheme =
                        one_of(value, &["auto", "spin", "nonspin"]).ok_or_else(invalid)?;
                }

                "dens_threshold" => {
                    let t: f64 = value.parse().map_err(|_| invalid())?;
                    if t.is_nan() || t < 0.0 {
                        return Err(invalid());
                    }
                    self.dens_threshold = t;
                }

                "input_energy_unit" => {
                    self.input_energy_unit = value.parse()?;
                }

                "input_length_unit" => {
                    self.input_length_unit = value.parse()?;
                }

                _ => {
                    return Err(ControlError::UnknownParameter {
                        line,
                        key: key.to_string(),
                    });
                }
            }
        }

        Ok(())
    }

    pub fn display(&self) {
        const OUT_WIDTH1: usize = 28;
        const OUT_WIDTH2: usize = 18;

        info!("   {:-^80}", " xc control parameters ");

        info!(
            "   {:<width1$} = {:>width2$}",
            "xc_backend",
            self.get_xc_backend(),
            width1 = OUT_WIDTH1,
            width2 = OUT_WIDTH2
        );

        info!(
            "   {:<width1$} = {:>width2$}",
            "spin_scheme",
            self.get_spin_scheme(),
            width1 = OUT_WIDTH1,
            width2 = OUT_WIDTH2
        );

        info!(
            "   {:<width1$} = {:>width2$.3E}",
            "dens_threshold",
            self.get_dens_threshold(),
            width1 = OUT_WIDTH1,
            width2 = OUT_WIDTH2
        );

        info!(
            "   {:<width1$} = {:>width2$}",
            "input_units",
            self.get_input_units().to_string(),
            width1 = OUT_WIDTH1,
            width2 = OUT_WIDTH2
        );

        info!(
            "   {:<width1$} = {:>width2$}",
            "verbosity",
            self.get_verbosity(),
            width1 = OUT_WIDTH1,
            width2 = OUT_WIDTH2
        );
    }
}

fn one_of(value: &str, allowed: &[&str]) -> Option<String> {
    let v = value.to_lowercase();
    if allowed.contains(&v.as_str()) {
        Some(v)
    } else {
        None
    }
}

fn read_file_data_to_vec(path: &Path) -> std::io::Result<Vec<String>> {
    let file = File::open(path)?;

    BufReader::new(file).lines().collect()
}
