//! Profile source extraction from vector documents.
//!
//! A document may hold several shape elements. Paths are interpreted and
//! scored by vertical span; the other element kinds are fallbacks used only
//! when no path produces at least two vertices.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use vessel_kernel_math::{Bounds2, Point2};
use vessel_path::{interpret, tokenize_path, PipelineConfig, Token};

use crate::error::{ProfileError, Result};

/// Default rectangle size when `width` or `height` is absent.
const DEFAULT_RECT_SIZE: f64 = 100.0;

/// Kind of element a profile was extracted from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// `<path d="...">`
    Path,
    /// `<polyline points="...">`
    Polyline,
    /// `<polygon points="...">`
    Polygon,
    /// `<line x1 y1 x2 y2>`
    Line,
    /// `<rect x y width height>`
    Rect,
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SourceKind::Path => "path",
            SourceKind::Polyline => "polyline",
            SourceKind::Polygon => "polygon",
            SourceKind::Line => "line",
            SourceKind::Rect => "rect",
        };
        f.write_str(s)
    }
}

/// A shape element pulled out of a document.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceElement {
    /// Path data, uninterpreted.
    Path {
        /// The `d` attribute, empty when missing. Kept so path indices
        /// follow document order.
        d: String,
    },
    /// Open vertex list.
    Polyline {
        /// Parsed `points`.
        points: Vec<Point2>,
    },
    /// Closed vertex list. The closing edge is implicit and not emitted.
    Polygon {
        /// Parsed `points`.
        points: Vec<Point2>,
    },
    /// A single straight segment.
    Line {
        /// Start point (`x1`, `y1`).
        from: Point2,
        /// End point (`x2`, `y2`).
        to: Point2,
    },
    /// An axis-aligned rectangle.
    Rect {
        /// Corner x.
        x: f64,
        /// Corner y.
        y: f64,
        /// Width.
        width: f64,
        /// Height.
        height: f64,
    },
}

impl SourceElement {
    /// Kind of this element.
    pub fn kind(&self) -> SourceKind {
        match self {
            SourceElement::Path { .. } => SourceKind::Path,
            SourceElement::Polyline { .. } => SourceKind::Polyline,
            SourceElement::Polygon { .. } => SourceKind::Polygon,
            SourceElement::Line { .. } => SourceKind::Line,
            SourceElement::Rect { .. } => SourceKind::Rect,
        }
    }
}

/// Shape elements of a parsed document, in document order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceDocument {
    elements: Vec<SourceElement>,
}

impl SourceDocument {
    /// Parse an XML document and collect its shape elements.
    ///
    /// Element names are matched without namespace prefix. Unknown elements
    /// and attributes are ignored.
    pub fn parse(xml: &str) -> Result<Self> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut elements = Vec::new();
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e) | Event::Empty(ref e)) => {
                    if let Some(element) = parse_element(e)? {
                        elements.push(element);
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(ProfileError::Xml(format!(
                        "error at position {}: {e}",
                        reader.buffer_position()
                    )));
                }
                _ => {}
            }
            buf.clear();
        }

        debug!(elements = elements.len(), "parsed source document");
        Ok(Self { elements })
    }

    /// Build a document from already extracted elements.
    pub fn from_elements(elements: Vec<SourceElement>) -> Self {
        Self { elements }
    }

    /// All elements in document order.
    pub fn elements(&self) -> &[SourceElement] {
        &self.elements
    }

    /// Elements of one kind, in document order.
    pub fn of_kind(&self, kind: SourceKind) -> impl Iterator<Item = &SourceElement> {
        self.elements.iter().filter(move |e| e.kind() == kind)
    }

    /// Whether the document has no shape elements.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

fn parse_element(e: &BytesStart<'_>) -> Result<Option<SourceElement>> {
    let local_name = e.local_name();
    let element = match local_name.as_ref() {
        b"path" => SourceElement::Path {
            d: get_attribute_opt(e, b"d")?.unwrap_or_default(),
        },
        b"polyline" => SourceElement::Polyline {
            points: parse_point_list(&get_attribute_opt(e, b"points")?.unwrap_or_default()),
        },
        b"polygon" => SourceElement::Polygon {
            points: parse_point_list(&get_attribute_opt(e, b"points")?.unwrap_or_default()),
        },
        b"line" => SourceElement::Line {
            from: Point2::new(number_attr(e, b"x1", 0.0)?, number_attr(e, b"y1", 0.0)?),
            to: Point2::new(number_attr(e, b"x2", 0.0)?, number_attr(e, b"y2", 0.0)?),
        },
        b"rect" => SourceElement::Rect {
            x: number_attr(e, b"x", 0.0)?,
            y: number_attr(e, b"y", 0.0)?,
            width: number_attr(e, b"width", DEFAULT_RECT_SIZE)?,
            height: number_attr(e, b"height", DEFAULT_RECT_SIZE)?,
        },
        _ => return Ok(None),
    };
    Ok(Some(element))
}

/// Get an optional attribute value by local name, with entity and
/// character references resolved.
fn get_attribute_opt(e: &BytesStart<'_>, name: &[u8]) -> Result<Option<String>> {
    for attr in e.attributes().flatten() {
        if attr.key.local_name().as_ref() == name {
            let value = attr
                .unescape_value()
                .map_err(|err| ProfileError::Xml(format!("invalid attribute value: {err}")))?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}

/// Numeric attribute with a default for missing or unparseable values.
fn number_attr(e: &BytesStart<'_>, name: &[u8], default: f64) -> Result<f64> {
    Ok(get_attribute_opt(e, name)?
        .as_deref()
        .and_then(leading_number)
        .unwrap_or(default))
}

/// Leading numeric literal of an attribute value, ignoring trailing units.
pub fn leading_number(value: &str) -> Option<f64> {
    let value = value.trim_start();
    let starts_numeric = value
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.'));
    if !starts_numeric {
        return None;
    }
    tokenize_path(value).first().and_then(Token::as_number)
}

/// Parse a `points` list into coordinate pairs. A dangling coordinate is dropped.
pub fn parse_point_list(value: &str) -> Vec<Point2> {
    let numbers: Vec<f64> = tokenize_path(value)
        .iter()
        .filter_map(Token::as_number)
        .collect();
    numbers
        .chunks_exact(2)
        .map(|c| Point2::new(c[0], c[1]))
        .collect()
}

/// The winning profile source and its raw vertices.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedSource {
    /// Element kind the vertices came from.
    pub kind: SourceKind,
    /// Index among elements of the same kind, in document order.
    pub index: usize,
    /// Raw vertices before cleaning.
    pub points: Vec<Point2>,
    /// The path interpreter hit its vertex or time budget.
    pub truncated: bool,
}

impl SelectedSource {
    /// Horizontal span of the raw vertices.
    pub fn x_range(&self) -> f64 {
        Bounds2::from_points(&self.points).map_or(0.0, |b| b.width())
    }

    /// Vertical span of the raw vertices.
    pub fn y_range(&self) -> f64 {
        Bounds2::from_points(&self.points).map_or(0.0, |b| b.height())
    }
}

/// Choose the element to build a profile from.
///
/// Every path is interpreted; paths with fewer than 2 vertices (including
/// those without path data) are skipped. Indices count every element of the
/// chosen kind in document order.
/// The path with the largest vertical span wins, ties going to the one with
/// more vertices. If no path qualifies, the first polyline, the first
/// polygon, all lines joined end to end, then the first rect are tried in
/// that order, taking the first that yields any vertices.
pub fn select_source(doc: &SourceDocument, config: &PipelineConfig) -> Result<SelectedSource> {
    let mut best: Option<(f64, SelectedSource)> = None;

    for (index, element) in doc.of_kind(SourceKind::Path).enumerate() {
        let SourceElement::Path { d } = element else {
            continue;
        };
        let result = interpret(d, config);
        if result.vertices.len() < 2 {
            debug!(index, vertices = result.vertices.len(), "skipping degenerate path");
            continue;
        }
        let candidate = SelectedSource {
            kind: SourceKind::Path,
            index,
            points: result.vertices,
            truncated: result.truncated,
        };
        let score = candidate.y_range();
        let better = match &best {
            None => true,
            Some((best_score, current)) => {
                score > *best_score
                    || (score == *best_score && candidate.points.len() > current.points.len())
            }
        };
        if better {
            best = Some((score, candidate));
        }
    }

    if let Some((_, selected)) = best {
        info!(
            index = selected.index,
            y_range = selected.y_range(),
            x_range = selected.x_range(),
            vertices = selected.points.len(),
            truncated = selected.truncated,
            "selected path"
        );
        return Ok(selected);
    }

    let fallback = first_fallback(doc).ok_or(ProfileError::NoProfileSource)?;
    info!(
        kind = %fallback.kind,
        index = fallback.index,
        vertices = fallback.points.len(),
        "no usable path, using fallback element"
    );
    Ok(fallback)
}

fn first_fallback(doc: &SourceDocument) -> Option<SelectedSource> {
    let selected = |kind, points: Vec<Point2>| {
        (!points.is_empty()).then_some(SelectedSource {
            kind,
            index: 0,
            points,
            truncated: false,
        })
    };

    let polyline = doc.of_kind(SourceKind::Polyline).next().and_then(|e| match e {
        SourceElement::Polyline { points } => selected(SourceKind::Polyline, points.clone()),
        _ => None,
    });
    if polyline.is_some() {
        return polyline;
    }

    let polygon = doc.of_kind(SourceKind::Polygon).next().and_then(|e| match e {
        SourceElement::Polygon { points } => selected(SourceKind::Polygon, points.clone()),
        _ => None,
    });
    if polygon.is_some() {
        return polygon;
    }

    let lines: Vec<Point2> = doc
        .of_kind(SourceKind::Line)
        .flat_map(|e| match e {
            SourceElement::Line { from, to } => vec![*from, *to],
            _ => Vec::new(),
        })
        .collect();
    if let Some(lines) = selected(SourceKind::Line, lines) {
        return Some(lines);
    }

    doc.of_kind(SourceKind::Rect).next().and_then(|e| match e {
        SourceElement::Rect {
            x,
            y,
            width,
            height,
        } => selected(
            SourceKind::Rect,
            vec![
                Point2::new(*x, *y),
                Point2::new(x + width, *y),
                Point2::new(x + width, y + height),
                Point2::new(*x, y + height),
            ],
        ),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_parse_collects_shapes() {
        let xml = r#"<?xml version="1.0"?>
            <svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100">
              <g>
                <path d="M0,0 L10,10"/>
                <path/>
                <polyline points="0,0 5,5 10,0"/>
                <line x1="1" y1="2" x2="3" y2="4"/>
                <rect width="20"/>
                <circle cx="5" cy="5" r="2"/>
              </g>
            </svg>"#;
        let doc = SourceDocument::parse(xml).unwrap();
        let kinds: Vec<_> = doc.elements().iter().map(SourceElement::kind).collect();
        assert_eq!(
            kinds,
            vec![
                SourceKind::Path,
                SourceKind::Path,
                SourceKind::Polyline,
                SourceKind::Line,
                SourceKind::Rect
            ]
        );
        assert_eq!(doc.elements()[1], SourceElement::Path { d: String::new() });
        assert_eq!(
            doc.elements()[4],
            SourceElement::Rect {
                x: 0.0,
                y: 0.0,
                width: 20.0,
                height: 100.0
            }
        );
    }

    #[test]
    fn test_parse_namespaced_elements() {
        let xml = r#"<svg:svg xmlns:svg="http://www.w3.org/2000/svg"><svg:path d="M1 2 L3 4"/></svg:svg>"#;
        let doc = SourceDocument::parse(xml).unwrap();
        assert_eq!(
            doc.elements(),
            &[SourceElement::Path {
                d: "M1 2 L3 4".into()
            }]
        );
    }

    #[test]
    fn test_parse_resolves_character_references() {
        let xml = r#"<svg>
            <path d="M0,0 L50,0&#32;50,100"/>
            <polyline points="0,0&#10;5,5&#x20;10,0"/>
        </svg>"#;
        let doc = SourceDocument::parse(xml).unwrap();
        assert_eq!(
            doc.elements()[0],
            SourceElement::Path {
                d: "M0,0 L50,0 50,100".into()
            }
        );
        let SourceElement::Polyline { points } = &doc.elements()[1] else {
            panic!("expected a polyline");
        };
        assert_eq!(points.len(), 3);

        let selected = select_source(&doc, &PipelineConfig::default()).unwrap();
        assert_eq!(selected.points.last(), Some(&Point2::new(50.0, 100.0)));
    }

    #[test]
    fn test_index_counts_paths_without_data() {
        let xml = r#"<svg><path/><path d="M0,0 L0,50"/></svg>"#;
        let doc = SourceDocument::parse(xml).unwrap();
        let selected = select_source(&doc, &PipelineConfig::default()).unwrap();
        assert_eq!(selected.kind, SourceKind::Path);
        assert_eq!(selected.index, 1);
    }

    #[test]
    fn test_parse_malformed_xml() {
        let result = SourceDocument::parse("<svg><path d='M0 0'></svg>");
        assert!(matches!(result, Err(ProfileError::Xml(_))));
    }

    #[test]
    fn test_leading_number() {
        assert_eq!(leading_number("12.5"), Some(12.5));
        assert_eq!(leading_number(" 100px"), Some(100.0));
        assert_eq!(leading_number("-3e2"), Some(-300.0));
        assert_eq!(leading_number("px100"), None);
        assert_eq!(leading_number(""), None);
    }

    #[test]
    fn test_point_list() {
        let pts = parse_point_list("0,0 10 , 5\n20,30 7");
        assert_eq!(
            pts,
            vec![
                Point2::new(0.0, 0.0),
                Point2::new(10.0, 5.0),
                Point2::new(20.0, 30.0)
            ]
        );
    }

    #[test]
    fn test_tallest_path_wins() {
        let doc = SourceDocument::from_elements(vec![
            SourceElement::Path {
                d: "M0,0 L100,10".into(),
            },
            SourceElement::Path {
                d: "M0,0 L5,50".into(),
            },
            SourceElement::Path {
                d: "M0,0".into(),
            },
        ]);
        let selected = select_source(&doc, &PipelineConfig::default()).unwrap();
        assert_eq!(selected.kind, SourceKind::Path);
        assert_eq!(selected.index, 1);
        assert_relative_eq!(selected.y_range(), 50.0);
        assert_relative_eq!(selected.x_range(), 5.0);
    }

    #[test]
    fn test_tie_prefers_more_points() {
        let doc = SourceDocument::from_elements(vec![
            SourceElement::Path {
                d: "M0,0 L0,50".into(),
            },
            SourceElement::Path {
                d: "M0,0 L5,25 L0,50".into(),
            },
        ]);
        let selected = select_source(&doc, &PipelineConfig::default()).unwrap();
        assert_eq!(selected.index, 1);
        assert_eq!(selected.points.len(), 3);
    }

    #[test]
    fn test_fallback_order() {
        let rect = SourceElement::Rect {
            x: 1.0,
            y: 2.0,
            width: 3.0,
            height: 4.0,
        };
        let line = SourceElement::Line {
            from: Point2::new(0.0, 0.0),
            to: Point2::new(1.0, 1.0),
        };
        let polygon = SourceElement::Polygon {
            points: vec![Point2::new(9.0, 9.0), Point2::new(8.0, 8.0)],
        };
        let config = PipelineConfig::default();

        let doc = SourceDocument::from_elements(vec![rect.clone(), line.clone(), polygon.clone()]);
        assert_eq!(select_source(&doc, &config).unwrap().kind, SourceKind::Polygon);

        let doc = SourceDocument::from_elements(vec![rect.clone(), line.clone(), line.clone()]);
        let selected = select_source(&doc, &config).unwrap();
        assert_eq!(selected.kind, SourceKind::Line);
        assert_eq!(selected.points.len(), 4);

        let doc = SourceDocument::from_elements(vec![rect]);
        let selected = select_source(&doc, &config).unwrap();
        assert_eq!(selected.kind, SourceKind::Rect);
        assert_eq!(selected.points[2], Point2::new(4.0, 6.0));
    }

    #[test]
    fn test_degenerate_paths_fall_back() {
        let doc = SourceDocument::from_elements(vec![
            SourceElement::Path { d: "M5,5".into() },
            SourceElement::Polyline {
                points: vec![Point2::new(0.0, 0.0), Point2::new(0.0, 10.0)],
            },
        ]);
        let selected = select_source(&doc, &PipelineConfig::default()).unwrap();
        assert_eq!(selected.kind, SourceKind::Polyline);
    }

    #[test]
    fn test_empty_document() {
        let doc = SourceDocument::parse("<svg><circle r='3'/></svg>").unwrap();
        assert!(doc.is_empty());
        assert!(matches!(
            select_source(&doc, &PipelineConfig::default()),
            Err(ProfileError::NoProfileSource)
        ));
    }
}
