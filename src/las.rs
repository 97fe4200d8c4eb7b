use anyhow::{anyhow, bail, Result};

use crate::models::{HeaderItem, LasCurve, LasFile, MnemonicCase};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Version,
    Well,
    Curve,
    Parameter,
    Other,
    Ascii,
    Unknown,
}

impl SectionKind {
    fn from_title(title: &str) -> Self {
        match title.chars().next().map(|c| c.to_ascii_uppercase()) {
            Some('V') => SectionKind::Version,
            Some('W') => SectionKind::Well,
            Some('C') => SectionKind::Curve,
            Some('P') => SectionKind::Parameter,
            Some('O') => SectionKind::Other,
            Some('A') => SectionKind::Ascii,
            _ => SectionKind::Unknown,
        }
    }
}

/// Raw section: the `~` title and its (line number, text) body lines.
#[derive(Debug, Clone)]
pub struct Section<'a> {
    pub kind: SectionKind,
    pub title: &'a str,
    pub lines: Vec<(usize, &'a str)>,
}

/// Low-level LAS text reader working on borrowed text.
pub struct LasTextReader<'a> {
    text: &'a str,
}

impl<'a> LasTextReader<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text }
    }

    /// True when the text opens (after comments) with a `~` section marker.
    pub fn is_valid(&self) -> bool {
        self.text
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty() && !line.starts_with('#'))
            .map(|line| line.starts_with('~'))
            .unwrap_or(false)
    }

    pub fn sections(&self) -> Vec<Section<'a>> {
        let mut sections: Vec<Section<'a>> = Vec::new();

        for (idx, raw) in self.text.lines().enumerate() {
            let line = raw.trim();
            if let Some(title) = line.strip_prefix('~') {
                sections.push(Section {
                    kind: SectionKind::from_title(title),
                    title,
                    lines: Vec::new(),
                });
                continue;
            }

            let Some(current) = sections.last_mut() else {
                continue;
            };

            // Comment lines are only skipped outside of ~Other, which is free text
            if current.kind != SectionKind::Other && (line.is_empty() || line.starts_with('#')) {
                continue;
            }
            current.lines.push((idx + 1, raw));
        }

        sections
    }

    pub fn parse(&self, case: MnemonicCase) -> Result<LasFile> {
        if !self.is_valid() {
            bail!("Not a valid LAS file: no section marker found");
        }

        let mut las = LasFile::new();
        let mut ascii_tokens: Vec<(usize, &str)> = Vec::new();

        for section in self.sections() {
            match section.kind {
                SectionKind::Version => las.version = parse_items(&section, case)?,
                SectionKind::Well => las.well = parse_items(&section, case)?,
                SectionKind::Parameter => las.params.extend(parse_items(&section, case)?),
                SectionKind::Curve => {
                    for item in parse_items(&section, case)? {
                        las.curves.push(
                            LasCurve::new(item.mnemonic, Vec::new())
                                .with_unit(item.unit)
                                .with_descr(item.descr),
                        );
                    }
                }
                SectionKind::Other => {
                    let body: Vec<&str> = section.lines.iter().map(|(_, l)| l.trim()).collect();
                    las.other = body.join("\n").trim().to_string();
                }
                SectionKind::Ascii => {
                    for (number, line) in section.lines.iter().copied() {
                        ascii_tokens.extend(line.split_whitespace().map(|t| (number, t)));
                    }
                }
                SectionKind::Unknown => {}
            }
        }

        fill_curves(&mut las, &ascii_tokens)?;
        Ok(las)
    }
}

/// Splits `MNEM.UNIT  VALUE : DESCRIPTION`.
///
/// The mnemonic ends at the first period, the unit at the first whitespace
/// after it and the description starts after the last colon.
pub fn parse_header_line(line: &str) -> Option<HeaderItem> {
    let line = line.trim();
    let (mnemonic, rest) = line.split_once('.')?;

    let (unit, remainder) = match rest.find(char::is_whitespace) {
        Some(pos) => (&rest[..pos], &rest[pos..]),
        None => match rest.rfind(':') {
            Some(pos) => (&rest[..pos], &rest[pos..]),
            None => (rest, ""),
        },
    };

    let (value, descr) = match remainder.rfind(':') {
        Some(pos) => (&remainder[..pos], &remainder[pos + 1..]),
        None => (remainder, ""),
    };

    Some(HeaderItem {
        mnemonic: mnemonic.trim().to_string(),
        unit: unit.trim().to_string(),
        value: value.trim().to_string(),
        descr: descr.trim().to_string(),
    })
}

fn parse_items(section: &Section<'_>, case: MnemonicCase) -> Result<Vec<HeaderItem>> {
    section
        .lines
        .iter()
        .map(|(number, line)| {
            let mut item = parse_header_line(line).ok_or_else(|| {
                anyhow!(
                    "line {}: malformed header line in ~{} section: '{}'",
                    number,
                    section.title,
                    line.trim()
                )
            })?;
            item.mnemonic = case.apply(&item.mnemonic);
            Ok(item)
        })
        .collect()
}

fn fill_curves(las: &mut LasFile, tokens: &[(usize, &str)]) -> Result<()> {
    let n_curves = las.curves.len();
    if n_curves == 0 {
        if !tokens.is_empty() {
            bail!("~ASCII section holds data but no curves are defined");
        }
        return Ok(());
    }

    if tokens.len() % n_curves != 0 {
        bail!(
            "~ASCII section holds {} values, not a multiple of the {} defined curves",
            tokens.len(),
            n_curves
        );
    }

    let null = las.null_value();
    for curve in las.curves.iter_mut() {
        curve.data.reserve(tokens.len() / n_curves);
    }

    for (i, (number, token)) in tokens.iter().enumerate() {
        let value: f64 = token
            .parse()
            .map_err(|_| anyhow!("line {}: invalid numeric value '{}'", number, token))?;
        let value = if is_null(value, null) { f64::NAN } else { value };
        las.curves[i % n_curves].data.push(value);
    }

    Ok(())
}

fn is_null(value: f64, null: f64) -> bool {
    value == null || (value - null).abs() <= f64::EPSILON * null.abs().max(1.0)
}
