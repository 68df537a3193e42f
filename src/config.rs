//! Command line configuration.
//!
//! Flags are looked up in two tables: value flags (`--name value`) that set a
//! numeric field, and switches (`-name`) that set a bit in [`Flags`]. Unknown
//! flags and malformed values are warned about and otherwise ignored, so a
//! typo never stops the animation from starting.

use bitflags::bitflags;

use crate::animation::Pacing;
use crate::error::ConfigError;
use crate::mesh::{Mode, PolygonDescriptor};

bitflags! {
    pub struct Flags: u8 {
        const STEP = 1 << 0;
        const CIRCUMSCRIBED = 1 << 1;
    }
}

pub const HELP: &str = "\
polygon-circle
Shows a regular polygon gaining sides one at a time until it can hardly be
told apart from the circle it is inscribed in (or circumscribed around).

Usage:
    polygon-circle [flags [values]]

Flags:
    -help                 Print this message and exit
    --pwidth   <number>   Outline thickness of the polygon
    --cwidth   <number>   Outline thickness of the circle
    --cres     <integer>  Number of sides used to draw the circle
    --interval <number>   Seconds between animation steps
    --pmax     <integer>  Side count at which the animation starts over
    --pstart   <integer>  Side count the animation starts (and restarts) at
    --samples  <integer>  Multisampling level (higher is smoother)
    --cscale   <number>   Radius of the circle relative to the window
    -step                 Add a side on each SPACE press instead of on a
                          timer; --interval is ignored
    -cscribe              Draw a circumscribed polygon instead of an
                          inscribed one

<number> is a decimal float. <integer> may be prefixed with 0x for
hexadecimal or 0 for octal.

Press ESC or close the window to quit.
";

/// Everything the animation can be tuned with.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub line_width: f32,
    pub circle_thickness: f32,
    pub circle_resolution: u32,
    pub interval: f32,
    pub max_sides: u32,
    pub start_sides: u32,
    pub sample_count: u32,
    pub scale: f32,
    pub flags: Flags,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            line_width: 0.01,
            circle_thickness: 0.01,
            circle_resolution: 100,
            interval: 0.5,
            max_sides: 50,
            start_sides: 3,
            sample_count: 10,
            scale: 0.95,
            flags: Flags::empty(),
        }
    }
}

/// Result of reading the command line.
#[derive(Debug, Clone, PartialEq)]
pub enum Parsed {
    Run(Config),
    Help,
}

#[derive(Clone, Copy)]
enum Setter {
    Int(fn(&mut Config, u32)),
    Float(fn(&mut Config, f32)),
}

const VALUE_FLAGS: &[(&str, Setter)] = &[
    ("pwidth", Setter::Float(|c, v| c.line_width = v)),
    ("cwidth", Setter::Float(|c, v| c.circle_thickness = v)),
    ("cres", Setter::Int(|c, v| c.circle_resolution = v)),
    ("interval", Setter::Float(|c, v| c.interval = v)),
    ("pmax", Setter::Int(|c, v| c.max_sides = v)),
    ("pstart", Setter::Int(|c, v| c.start_sides = v)),
    ("samples", Setter::Int(|c, v| c.sample_count = v)),
    ("cscale", Setter::Float(|c, v| c.scale = v)),
];

const SWITCHES: &[(&str, Flags)] = &[
    ("step", Flags::STEP),
    ("cscribe", Flags::CIRCUMSCRIBED),
];

const MIN_SIDES: u32 = 3;
/// Largest side count a mesh is built with.
pub const MAX_SIDES: u32 = 1 << 16;

impl Config {
    /// Reads flags from `args` (without the program name), logging a warning
    /// for every argument that could not be applied.
    pub fn from_args<I, S>(args: I) -> Parsed
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let (parsed, warnings) = Self::parse_args(args);
        for warning in &warnings {
            log::warn!("{warning}");
        }
        parsed
    }

    /// Like [`Config::from_args`] but hands the warnings back instead of
    /// logging them.
    pub fn parse_args<I, S>(args: I) -> (Parsed, Vec<ConfigError>)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut config = Config::default();
        let mut warnings = Vec::new();
        let mut args = args.into_iter().map(Into::into);

        while let Some(arg) = args.next() {
            if arg.len() <= 2 || !arg.starts_with('-') {
                warnings.push(ConfigError::UnknownFlag(arg));
                continue;
            }

            if let Some(name) = arg.strip_prefix("--") {
                let Some(&(_, setter)) = VALUE_FLAGS.iter().find(|(flag, _)| *flag == name) else {
                    warnings.push(ConfigError::UnknownFlag(arg));
                    continue;
                };
                let Some(value) = args.next() else {
                    warnings.push(ConfigError::MissingValue(arg));
                    continue;
                };
                if let Err(error) = config.apply(setter, &arg, value) {
                    warnings.push(error);
                }
            } else {
                let name = &arg[1..];
                if name == "help" {
                    return (Parsed::Help, warnings);
                }
                match SWITCHES.iter().find(|(switch, _)| *switch == name) {
                    Some(&(_, bit)) => config.flags.insert(bit),
                    None => warnings.push(ConfigError::UnknownFlag(arg)),
                }
            }
        }

        (Parsed::Run(config), warnings)
    }

    fn apply(&mut self, setter: Setter, flag: &str, value: String) -> Result<(), ConfigError> {
        match setter {
            Setter::Int(set) => match parse_count(&value) {
                Some(v) => set(self, v),
                None => {
                    return Err(ConfigError::InvalidInteger {
                        flag: flag.to_string(),
                        value,
                    })
                }
            },
            Setter::Float(set) => match value.trim().parse::<f32>() {
                Ok(v) => set(self, v),
                Err(_) => {
                    return Err(ConfigError::InvalidNumber {
                        flag: flag.to_string(),
                        value,
                    })
                }
            },
        }
        Ok(())
    }

    /// Clamps side counts to something drawable and rejects an empty
    /// animation range.
    pub fn validate(mut self) -> Result<Config, ConfigError> {
        if self.start_sides < MIN_SIDES {
            log::warn!(
                "starting side count {} is below {MIN_SIDES}, using {MIN_SIDES}",
                self.start_sides
            );
            self.start_sides = MIN_SIDES;
        }
        if self.circle_resolution < MIN_SIDES {
            log::warn!(
                "circle resolution {} is below {MIN_SIDES}, using {MIN_SIDES}",
                self.circle_resolution
            );
            self.circle_resolution = MIN_SIDES;
        }
        if self.circle_resolution > MAX_SIDES {
            log::warn!(
                "circle resolution {} is above {MAX_SIDES}, using {MAX_SIDES}",
                self.circle_resolution
            );
            self.circle_resolution = MAX_SIDES;
        }
        if self.max_sides > MAX_SIDES {
            log::warn!(
                "side count limit {} is above {MAX_SIDES}, using {MAX_SIDES}",
                self.max_sides
            );
            self.max_sides = MAX_SIDES;
        }
        if self.max_sides <= self.start_sides {
            return Err(ConfigError::EmptyRange {
                start: self.start_sides,
                end: self.max_sides,
            });
        }
        Ok(self)
    }

    pub fn step_mode(&self) -> bool {
        self.flags.contains(Flags::STEP)
    }

    pub fn circumscribed(&self) -> bool {
        self.flags.contains(Flags::CIRCUMSCRIBED)
    }

    pub fn mode(&self) -> Mode {
        if self.circumscribed() {
            Mode::Circumscribed
        } else {
            Mode::Inscribed
        }
    }

    pub fn pacing(&self) -> Pacing {
        if self.step_mode() {
            Pacing::Stepped
        } else {
            Pacing::Timed {
                interval: self.interval,
            }
        }
    }

    pub fn polygon(&self, side_count: u32) -> PolygonDescriptor {
        PolygonDescriptor {
            side_count,
            scale: self.scale,
            thickness: self.line_width,
            mode: self.mode(),
        }
    }

    pub fn circle(&self) -> PolygonDescriptor {
        PolygonDescriptor {
            side_count: self.circle_resolution,
            scale: self.scale,
            thickness: self.circle_thickness,
            mode: self.mode(),
        }
    }
}

/// Parses a non-negative integer with an optional sign and a C-style radix
/// prefix (`0x` hexadecimal, leading `0` octal).
fn parse_count(text: &str) -> Option<u32> {
    let text = text.trim();
    let (negative, digits) = match text.as_bytes().first()? {
        b'-' => (true, &text[1..]),
        b'+' => (false, &text[1..]),
        _ => (false, text),
    };

    let (radix, digits) = if let Some(hex) = digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        (16, hex)
    } else if digits.len() > 1 && digits.starts_with('0') {
        (8, &digits[1..])
    } else {
        (10, digits)
    };

    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }
    let value = u32::from_str_radix(digits, radix).ok()?;
    if negative && value != 0 {
        return None;
    }
    Some(value)
}
