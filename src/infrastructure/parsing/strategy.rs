//! Structural extraction strategies
//!
//! Each strategy recognises one way a page can lay out label/value data and is
//! a pure function from a [`Document`] to raw pairs. Selectors are compiled
//! once, when the source registry is built.

use scraper::Selector;
use tracing::{debug, warn};

use super::config::{BodyTextConfig, MuhurtaCardConfig, StrategyConfig};
use crate::domain::{RawField, TimedSegment};
use crate::infrastructure::document::{Document, Node};
use crate::infrastructure::{ExtractionError, ExtractionResult};

/// Compile selector strings, skipping (and logging) the ones that fail.
///
/// Errors only when a non-empty list yields nothing usable.
pub fn compile_selectors(selector_strings: &[String]) -> ExtractionResult<Vec<Selector>> {
    let mut selectors = Vec::new();
    let mut errors = Vec::new();

    for selector_str in selector_strings {
        match Selector::parse(selector_str) {
            Ok(selector) => selectors.push(selector),
            Err(e) => {
                warn!("Failed to compile selector '{}': {}", selector_str, e);
                errors.push(format!("'{selector_str}': {e}"));
            }
        }
    }

    if selectors.is_empty() && !selector_strings.is_empty() {
        return Err(ExtractionError::configuration(format!(
            "No valid selectors compiled from {} attempts. Errors: {}",
            selector_strings.len(),
            errors.join(", ")
        )));
    }

    Ok(selectors)
}

/// A compiled structural strategy
#[derive(Debug)]
pub enum RowStrategy {
    TableRows(TableRowStrategy),
    LabelBlocks(LabelBlockStrategy),
    DefinitionList(DefinitionListStrategy),
    MuhurtaCards(MuhurtaCardStrategy),
    Anchored(AnchoredStrategy),
}

impl RowStrategy {
    pub fn compile(config: &StrategyConfig) -> ExtractionResult<Self> {
        Ok(match config {
            StrategyConfig::TableRows { rows, cells } => Self::TableRows(TableRowStrategy {
                rows: compile_selectors(rows)?,
                cells: compile_selectors(cells)?,
            }),
            StrategyConfig::LabelBlocks { blocks, left, right } => {
                Self::LabelBlocks(LabelBlockStrategy {
                    blocks: compile_selectors(blocks)?,
                    left: compile_selectors(left)?,
                    right: compile_selectors(right)?,
                })
            }
            StrategyConfig::DefinitionList { lists } => {
                Self::DefinitionList(DefinitionListStrategy::new(compile_selectors(lists)?)?)
            }
            StrategyConfig::MuhurtaCards(card) => Self::MuhurtaCards(MuhurtaCardStrategy::compile(card)?),
            StrategyConfig::Anchored { label, selectors } => Self::Anchored(AnchoredStrategy {
                label: label.clone(),
                selectors: compile_selectors(selectors)?,
            }),
        })
    }

    pub const fn name(&self) -> &'static str {
        match self {
            Self::TableRows(_) => "table_rows",
            Self::LabelBlocks(_) => "label_blocks",
            Self::DefinitionList(_) => "definition_list",
            Self::MuhurtaCards(_) => "muhurta_cards",
            Self::Anchored(_) => "anchored",
        }
    }

    pub fn extract(&self, doc: &Document) -> Vec<RawField> {
        let fields = match self {
            Self::TableRows(s) => s.extract(doc),
            Self::LabelBlocks(s) => s.extract(doc),
            Self::DefinitionList(s) => s.extract(doc),
            Self::MuhurtaCards(s) => s.extract(doc),
            Self::Anchored(s) => s.extract(doc),
        };
        debug!("Strategy {} produced {} candidate pairs", self.name(), fields.len());
        fields
    }
}

/// `tr`-like rows read as (cell0, cell1) and, with four or more cells, (cell2, cell3)
#[derive(Debug)]
pub struct TableRowStrategy {
    rows: Vec<Selector>,
    cells: Vec<Selector>,
}

impl TableRowStrategy {
    pub fn extract(&self, doc: &Document) -> Vec<RawField> {
        let mut fields = Vec::new();
        for row_selector in &self.rows {
            for row in doc.query(row_selector) {
                let cells = self
                    .cells
                    .iter()
                    .map(|cell_selector| row.query(cell_selector))
                    .find(|cells| cells.len() >= 2)
                    .unwrap_or_default();

                for pair in cells.chunks(2).take(2) {
                    if let [label, value] = pair {
                        fields.push(RawField::new(label.text(), value.text()));
                    }
                }
            }
        }
        fields
    }
}

/// Widgets with a left block (label) and a right block (value).
///
/// When the class-based left/right lookup fails, a widget with exactly two
/// element children is read positionally.
#[derive(Debug)]
pub struct LabelBlockStrategy {
    blocks: Vec<Selector>,
    left: Vec<Selector>,
    right: Vec<Selector>,
}

impl LabelBlockStrategy {
    pub fn extract(&self, doc: &Document) -> Vec<RawField> {
        let mut fields = Vec::new();
        for block_selector in &self.blocks {
            for block in doc.query(block_selector) {
                if let Some(field) = self.read_block(block) {
                    fields.push(field);
                }
            }
        }
        fields
    }

    fn read_block(&self, block: Node<'_>) -> Option<RawField> {
        if let (Some(left), Some(right)) = (block.query_first(&self.left), block.query_first(&self.right)) {
            return Some(RawField::new(left.text(), right.text()));
        }
        match block.element_children().as_slice() {
            [left, right] => Some(RawField::new(left.text(), right.text())),
            _ => None,
        }
    }
}

/// `<dt>`/`<dd>` pairs inside definition lists
#[derive(Debug)]
pub struct DefinitionListStrategy {
    lists: Vec<Selector>,
    term: Selector,
    definition: Selector,
}

impl DefinitionListStrategy {
    fn new(lists: Vec<Selector>) -> ExtractionResult<Self> {
        let parse = |s: &str| {
            Selector::parse(s).map_err(|e| ExtractionError::configuration(format!("'{s}': {e}")))
        };
        Ok(Self {
            lists,
            term: parse("dt")?,
            definition: parse("dd")?,
        })
    }

    pub fn extract(&self, doc: &Document) -> Vec<RawField> {
        let mut fields = Vec::new();
        for list_selector in &self.lists {
            for list in doc.query(list_selector) {
                let terms = list.query(&self.term);
                let definitions = list.query(&self.definition);
                for (term, definition) in terms.iter().zip(definitions.iter()) {
                    fields.push(RawField::new(term.text(), definition.text()));
                }
            }
        }
        fields
    }
}

/// Repeated muhurta cards: a name plus a timing cell whose first direct child
/// is the start time and whose (last) nested inline element is the end time.
#[derive(Debug)]
pub struct MuhurtaCardStrategy {
    cards: Vec<Selector>,
    name: Vec<Selector>,
    timing: Vec<Selector>,
    end: Vec<Selector>,
    info: Vec<Selector>,
    note: Vec<Selector>,
    default_name: Option<String>,
    connectors: Vec<String>,
}

impl MuhurtaCardStrategy {
    fn compile(config: &MuhurtaCardConfig) -> ExtractionResult<Self> {
        Ok(Self {
            cards: compile_selectors(&config.cards)?,
            name: compile_selectors(&config.name)?,
            timing: compile_selectors(&config.timing)?,
            end: compile_selectors(&config.end)?,
            info: compile_selectors(&config.info)?,
            note: compile_selectors(&config.note)?,
            default_name: config.default_name.clone(),
            connectors: config.connectors.clone(),
        })
    }

    /// Every card that has a name and at least a start time, in page order.
    ///
    /// Card selectors are alternatives: the first one that yields a readable
    /// card is used alone, so a row matching several is read once.
    pub fn segments(&self, doc: &Document) -> Vec<TimedSegment> {
        self.cards
            .iter()
            .map(|card_selector| {
                doc.query(card_selector)
                    .into_iter()
                    .filter_map(|card| self.read_card(card))
                    .collect::<Vec<_>>()
            })
            .find(|segments| !segments.is_empty())
            .unwrap_or_default()
    }

    /// Each segment as (name, "start - end")
    pub fn extract(&self, doc: &Document) -> Vec<RawField> {
        self.segments(doc)
            .into_iter()
            .map(|segment| {
                let span = segment.span();
                RawField::new(segment.name, span)
            })
            .collect()
    }

    fn read_card(&self, card: Node<'_>) -> Option<TimedSegment> {
        let name = card
            .query_first(&self.name)
            .map(|node| node.text())
            .or_else(|| self.default_name.clone())?;
        let timing = card.query_first(&self.timing)?;

        let parts = timing.child_parts();
        let trailing = |text: &str| trim_connectors(text, &self.connectors, Edge::Trailing);
        let leading = |text: &str| trim_connectors(text, &self.connectors, Edge::Leading);

        // Start: the first direct child, text or inline element, that is more than a connector
        let start_at = parts.iter().position(|part| !trailing(&part.text()).is_empty());
        let start = start_at.map(|at| trailing(&parts[at].text())).unwrap_or_default();
        let start_node = start_at.and_then(|at| parts[at].node());

        // End: the last end-selector match that is not the start element, else the next part
        let end = self
            .end
            .iter()
            .find_map(|selector| {
                timing.query(selector).into_iter().rev().find(|node| {
                    !node.text().is_empty() && !start_node.is_some_and(|first| first.is_same(node))
                })
            })
            .map(|node| leading(&node.text()))
            .filter(|text| !text.is_empty())
            .or_else(|| {
                let after = start_at.map_or(parts.len(), |at| at + 1);
                parts[after..]
                    .iter()
                    .map(|part| leading(&part.text()))
                    .find(|text| !text.is_empty())
            })
            .unwrap_or_default();

        // Some layouts render "07:30 AM से 09:00 AM" as a single text node
        let (start, end) = if end.is_empty() {
            split_on_connector(&start, &self.connectors).unwrap_or((start, end))
        } else {
            (start, end)
        };

        if start.is_empty() {
            debug!("Skipping card '{}' without a start time", name);
            return None;
        }

        Some(TimedSegment {
            name,
            start,
            end,
            info: card.query_first(&self.info).map(|node| node.text()),
            note: card.query_first(&self.note).map(|node| node.text()),
        })
    }
}

#[derive(Clone, Copy)]
enum Edge {
    Leading,
    Trailing,
}

/// Remove connector tokens ("to", "से", "–") from one edge of a timing part
fn trim_connectors(text: &str, connectors: &[String], edge: Edge) -> String {
    let mut current = text.trim().to_string();
    loop {
        let before = current.len();
        for connector in connectors.iter().filter(|c| !c.is_empty()) {
            let word_like = connector.chars().all(char::is_alphanumeric);
            current = match edge {
                Edge::Leading => match current.strip_prefix(connector.as_str()) {
                    Some(rest) if !word_like || rest.is_empty() || rest.starts_with(char::is_whitespace) => {
                        rest.trim_start().to_string()
                    }
                    _ => current,
                },
                Edge::Trailing => match current.strip_suffix(connector.as_str()) {
                    Some(rest) if !word_like || rest.is_empty() || rest.ends_with(char::is_whitespace) => {
                        rest.trim_end().to_string()
                    }
                    _ => current,
                },
            };
        }
        if current.len() == before {
            return current;
        }
    }
}

/// Split single-node timing text at the first connector between two non-empty halves
fn split_on_connector(text: &str, connectors: &[String]) -> Option<(String, String)> {
    connectors
        .iter()
        .filter(|c| !c.is_empty())
        .filter_map(|connector| {
            let word_like = connector.chars().all(char::is_alphanumeric);
            text.match_indices(connector.as_str()).find_map(|(at, _)| {
                let (before, after) = (&text[..at], &text[at + connector.len()..]);
                let bounded = !word_like
                    || (before.ends_with(char::is_whitespace) && after.starts_with(char::is_whitespace));
                let (before, after) = (before.trim(), after.trim());
                (bounded && !before.is_empty() && !after.is_empty()).then_some((at, before, after))
            })
        })
        .min_by_key(|(at, _, _)| *at)
        .map(|(_, before, after)| (before.to_string(), after.to_string()))
}

/// A fixed label whose value is the first non-empty match of its selectors
#[derive(Debug)]
pub struct AnchoredStrategy {
    label: String,
    selectors: Vec<Selector>,
}

impl AnchoredStrategy {
    pub fn extract(&self, doc: &Document) -> Vec<RawField> {
        doc.query_first(&self.selectors)
            .map(|node| vec![RawField::new(self.label.clone(), node.text())])
            .unwrap_or_default()
    }
}

/// Content sniffing for free-text pages: the first paragraph-like block whose
/// text is longer than `min_chars` characters.
#[derive(Debug)]
pub struct BodyTextStrategy {
    paragraphs: Vec<Selector>,
    min_chars: usize,
}

impl BodyTextStrategy {
    pub fn compile(config: &BodyTextConfig) -> ExtractionResult<Self> {
        Ok(Self {
            paragraphs: compile_selectors(&config.paragraphs)?,
            min_chars: config.min_chars,
        })
    }

    pub fn sniff(&self, doc: &Document) -> Option<String> {
        self.paragraphs.iter().find_map(|selector| {
            doc.query(selector)
                .into_iter()
                .map(|node| node.text())
                .find(|text| text.chars().count() > self.min_chars)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::parsing::config::SourceConfig;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    fn doc(markup: &str) -> Document {
        Document::parse(markup).unwrap()
    }

    #[test]
    fn test_compile_selectors_skips_invalid_entries() {
        let compiled = compile_selectors(&strings(&["td:::", "td"])).unwrap();
        assert_eq!(compiled.len(), 1);
        assert!(matches!(
            compile_selectors(&strings(&["td:::"])),
            Err(ExtractionError::Configuration { .. })
        ));
        assert!(compile_selectors(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_table_rows_read_two_pairs_per_dense_row() {
        let strategy = RowStrategy::compile(&StrategyConfig::TableRows {
            rows: strings(&["tr"]),
            cells: strings(&["th, td"]),
        })
        .unwrap();
        let fields = strategy.extract(&doc(
            "<table>
               <tr><th>Tithi</th><td>Ekadashi</td><th>Paksha</th><td>Shukla</td></tr>
               <tr><td>Sunrise</td><td>06:45 AM</td><td>stray</td></tr>
               <tr><td>lonely</td></tr>
             </table>",
        ));
        assert_eq!(
            fields,
            vec![
                RawField::new("Tithi", "Ekadashi"),
                RawField::new("Paksha", "Shukla"),
                RawField::new("Sunrise", "06:45 AM"),
            ]
        );
    }

    #[test]
    fn test_label_blocks_fall_back_to_position() {
        let strategy = RowStrategy::compile(&StrategyConfig::LabelBlocks {
            blocks: strings(&[".row"]),
            left: strings(&[".k"]),
            right: strings(&[".v"]),
        })
        .unwrap();
        let fields = strategy.extract(&doc(
            r#"<div class="row"><span class="k">Yoga</span><span class="v">Siddhi</span></div>
               <div class="row"><b>Karana</b><i>Bava</i></div>
               <div class="row"><b>a</b><b>b</b><b>c</b></div>"#,
        ));
        assert_eq!(
            fields,
            vec![RawField::new("Yoga", "Siddhi"), RawField::new("Karana", "Bava")]
        );
    }

    #[test]
    fn test_definition_list_pairs() {
        let strategy = RowStrategy::compile(&StrategyConfig::DefinitionList {
            lists: strings(&["dl"]),
        })
        .unwrap();
        let fields = strategy.extract(&doc("<dl><dt>Sunset</dt><dd>05:58 PM</dd></dl>"));
        assert_eq!(fields, vec![RawField::new("Sunset", "05:58 PM")]);
    }

    #[test]
    fn test_muhurta_card_splits_on_nested_end_element() {
        let config = SourceConfig::choghadiya();
        let StrategyConfig::MuhurtaCards(card) = &config.strategies[0] else {
            panic!("expected muhurta cards");
        };
        let strategy = MuhurtaCardStrategy::compile(card).unwrap();
        let segments = strategy.segments(&doc(
            r#"<div class="dpMuhurtaCard">
                 <div class="dpMuhurtaRow">
                   <div class="dpMuhurtaName"><span class="dpVerticalMiddleText">Amrit</span></div>
                   <div class="dpMuhurtaTime"><span class="dpVerticalMiddleText">06:12 AM<span class="dpInlineBlock">07:45 AM</span></span></div>
                 </div>
                 <div class="dpMuhurtaRow">
                   <div class="dpMuhurtaName"><span class="dpVerticalMiddleText">Kaal</span></div>
                   <div class="dpMuhurtaTime"><span class="dpVerticalMiddleText">07:45 AM से <span class="dpInlineBlock">to 09:18 AM</span></span></div>
                 </div>
               </div>"#,
        ));
        assert_eq!(segments.len(), 2);
        assert_eq!(
            (segments[0].name.as_str(), segments[0].start.as_str(), segments[0].end.as_str()),
            ("Amrit", "06:12 AM", "07:45 AM")
        );
        assert_eq!(segments[1].start, "07:45 AM");
        assert_eq!(segments[1].end, "09:18 AM");
    }

    fn rahu_kaal_cards() -> MuhurtaCardStrategy {
        let config = SourceConfig::rahu_kaal();
        let StrategyConfig::MuhurtaCards(card) = &config.strategies[0] else {
            panic!("expected muhurta cards");
        };
        MuhurtaCardStrategy::compile(card).unwrap()
    }

    #[test]
    fn test_muhurta_card_with_both_times_wrapped() {
        let segments = rahu_kaal_cards().segments(&doc(
            r#"<div class="dpMuhurtaCard">
                 <div class="dpMuhurtaCardTiming"><span>10:38 AM</span> to <span>12:05 PM</span></div>
               </div>"#,
        ));
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].name, "Rahu Kaal");
        assert_eq!(segments[0].start, "10:38 AM");
        assert_eq!(segments[0].end, "12:05 PM");
    }

    #[test]
    fn test_muhurta_card_end_falls_back_to_next_part() {
        let segments = rahu_kaal_cards().segments(&doc(
            r#"<div class="dpMuhurtaCard">
                 <div class="dpMuhurtaCardTiming"><b>10:38 AM</b> <i>से</i> 12:05 PM</div>
               </div>
               <div class="dpMuhurtaCard">
                 <div class="dpMuhurtaCardTiming">10:38 AM</div>
               </div>"#,
        ));
        assert_eq!(segments.len(), 2);
        assert_eq!((segments[0].start.as_str(), segments[0].end.as_str()), ("10:38 AM", "12:05 PM"));
        assert_eq!((segments[1].start.as_str(), segments[1].end.as_str()), ("10:38 AM", ""));
    }

    #[test]
    fn test_trim_connectors_keeps_times_intact() {
        let connectors = strings(&["to", "से", "-", "–"]);
        assert_eq!(trim_connectors("to 09:18 AM", &connectors, Edge::Leading), "09:18 AM");
        assert_eq!(trim_connectors("– 09:18", &connectors, Edge::Leading), "09:18");
        assert_eq!(trim_connectors("07:45 AM से", &connectors, Edge::Trailing), "07:45 AM");
        assert_eq!(trim_connectors("tomorrow", &connectors, Edge::Leading), "tomorrow");
    }

    #[test]
    fn test_single_text_node_timing_is_split_on_connector() {
        let connectors = strings(&["to", "से", "-"]);
        assert_eq!(
            split_on_connector("10:38 AM से 12:05 PM", &connectors),
            Some(("10:38 AM".to_string(), "12:05 PM".to_string()))
        );
        assert_eq!(
            split_on_connector("06:00 AM to 07:30 AM", &connectors),
            Some(("06:00 AM".to_string(), "07:30 AM".to_string()))
        );
        assert_eq!(split_on_connector("10:38 AM", &connectors), None);
        assert_eq!(split_on_connector("Tomorrow 10:38", &connectors), None);
    }

    #[test]
    fn test_anchored_strategy() {
        let strategy = RowStrategy::compile(&StrategyConfig::Anchored {
            label: "city".to_string(),
            selectors: strings(&[".missing", ".loc"]),
        })
        .unwrap();
        let fields = strategy.extract(&doc(r#"<div class="loc"> New Delhi, India </div>"#));
        assert_eq!(fields, vec![RawField::new("city", "New Delhi, India")]);
    }

    #[test]
    fn test_body_text_needs_more_than_min_chars() {
        let strategy = BodyTextStrategy::compile(&BodyTextConfig {
            paragraphs: strings(&[".Rashifal p", "p"]),
            min_chars: 20,
        })
        .unwrap();
        let found = strategy.sniff(&doc(
            "<p>short</p><p>exactly twenty chars</p><p>this paragraph is comfortably long enough</p>",
        ));
        assert_eq!(found.as_deref(), Some("this paragraph is comfortably long enough"));
        assert!(strategy.sniff(&doc("<p>tiny</p>")).is_none());
    }
}
