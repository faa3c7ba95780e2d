//! Feed scanner: splits pasted text into student blocks and extracts
//! vocabulary-test and practice-card records.
//!
//! The grammar is fixed to what the platform emits. Scanning is
//! best-effort: malformed fragments are dropped and counted, never
//! surfaced as errors.

use regex::Regex;
use std::sync::OnceLock;
use tracing::debug;

use crate::error::{ScanDiagnostics, SkipReason};
use crate::model::{
    card_accuracy, AttemptKey, CardCategory, CardRecord, CardStatus, Modality, StudentBlock,
    TestObservation, TestRecord,
};

/// Marker that a vocabulary test has not finished yet.
const IN_PROGRESS: &str = "正在进行";
/// Marker that a session reached completion.
const COMPLETED: &str = "已完成";
/// Descriptor marker for the listening modality.
const LISTENING: &str = "听测";
/// Descriptor tag for SAT practice cards.
const SAT_TAG: &str = "[SAT]";

/// Records extracted from a single student block.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockRecords {
    pub student: String,
    /// Countable test occurrences, input order.
    pub observations: Vec<TestObservation>,
    /// Practice cards, input order.
    pub cards: Vec<CardRecord>,
}

/// Everything extracted from one feed scan.
#[derive(Debug, Clone, Default)]
pub struct ScanOutcome {
    pub blocks: Vec<BlockRecords>,
    pub diagnostics: ScanDiagnostics,
}

impl ScanOutcome {
    /// All test observations across blocks, in input order.
    pub fn observations(&self) -> impl Iterator<Item = &TestObservation> {
        self.blocks.iter().flat_map(|b| b.observations.iter())
    }
}

/// Scans a whole feed: splits it into blocks, extracts their records,
/// and counts everything that had to be dropped.
pub fn scan_feed(input: &str) -> ScanOutcome {
    let mut outcome = ScanOutcome::default();
    for paragraph in paragraphs(input) {
        outcome.diagnostics.blocks_seen += 1;
        let index = outcome.diagnostics.blocks_seen;
        let Some(block) = read_block(paragraph) else {
            debug!(block = index, "dropping block without a student header");
            outcome.diagnostics.blocks_dropped += 1;
            outcome
                .diagnostics
                .warn(index, None, SkipReason::MissingHeader);
            continue;
        };
        let records = extract_records(&block, index, &mut outcome.diagnostics);
        outcome.blocks.push(records);
    }
    outcome
}

/// Splits a feed into student blocks, silently dropping paragraphs
/// that have no readable header.
pub fn split_blocks(input: &str) -> Vec<StudentBlock<'_>> {
    paragraphs(input).into_iter().filter_map(read_block).collect()
}

/// Blank-line-separated paragraphs of the trimmed input.
fn paragraphs(input: &str) -> Vec<&str> {
    block_split_re()
        .split(input.trim())
        .filter(|p| !p.is_empty())
        .collect()
}

/// Reads the `name :` header off a paragraph. The first ASCII colon
/// ends the name; the whitespace before it may wrap onto a new line.
fn read_block(paragraph: &str) -> Option<StudentBlock<'_>> {
    let caps = header_re().captures(paragraph)?;
    let name = caps.get(1).map(|m| m.as_str().trim())?;
    Some(StudentBlock {
        name,
        body: paragraph,
    })
}

/// Outcome of reading one vocabulary-test occurrence.
enum TestScan {
    /// Still running; not countable.
    InProgress,
    /// No parseable accuracy; contributes nothing.
    Unusable,
    Observation(TestObservation),
}

fn extract_records(
    block: &StudentBlock<'_>,
    index: usize,
    diag: &mut ScanDiagnostics,
) -> BlockRecords {
    let mut records = BlockRecords {
        student: block.name.to_owned(),
        observations: Vec::new(),
        cards: Vec::new(),
    };

    for caps in record_re().captures_iter(block.body) {
        let tag = caps.get(1).map_or("", |m| m.as_str());
        let descriptor = caps.get(2).map_or("", |m| m.as_str());
        let result = caps.get(3).map_or("", |m| m.as_str());

        if tag == "词测" {
            diag.tests_seen += 1;
            match read_test(block.name, descriptor, result) {
                TestScan::InProgress => diag.tests_in_progress += 1,
                TestScan::Unusable => {
                    debug!(student = block.name, "dropping test without an accuracy");
                    diag.tests_dropped += 1;
                    diag.warn(index, Some(block.name), SkipReason::IncompleteTest);
                }
                TestScan::Observation(obs) => {
                    if obs.record.is_none() {
                        debug!(
                            student = block.name,
                            range = obs.key.range,
                            "test counts toward retries but is missing result fields"
                        );
                        diag.tests_dropped += 1;
                        diag.warn(index, Some(block.name), SkipReason::IncompleteTest);
                    }
                    records.observations.push(obs);
                }
            }
        } else {
            diag.cards_seen += 1;
            match read_card(block.name, descriptor, result) {
                Some(card) => records.cards.push(card),
                None => {
                    debug!(student = block.name, "dropping card without error counts");
                    diag.cards_dropped += 1;
                    diag.warn(index, Some(block.name), SkipReason::IncompleteCard);
                }
            }
        }
    }

    records
}

fn read_test(student: &str, descriptor: &str, result: &str) -> TestScan {
    if result.contains(IN_PROGRESS) {
        return TestScan::InProgress;
    }
    let Some(accuracy) = capture_u32(accuracy_re(), result) else {
        return TestScan::Unusable;
    };

    let key = AttemptKey {
        student: student.to_owned(),
        modality: modality_of(descriptor),
        range: range_of(descriptor),
    };
    let record = read_test_fields(result).map(|(word_count, reaction_secs, error_count)| {
        TestRecord {
            student: key.student.clone(),
            modality: key.modality,
            range: key.range.clone(),
            word_count,
            accuracy,
            reaction_secs,
            error_count,
        }
    });

    TestScan::Observation(TestObservation {
        key,
        accuracy,
        record,
    })
}

/// The three result fields beyond accuracy. All must parse for the
/// occurrence to yield a full record.
fn read_test_fields(result: &str) -> Option<(u32, f64, u32)> {
    let word_count = capture_u32(word_count_re(), result)?;
    let reaction_secs = reaction_re()
        .captures(result)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())?;
    let error_count = capture_u32(error_count_re(), result)?;
    Some((word_count, reaction_secs, error_count))
}

fn read_card(student: &str, descriptor: &str, result: &str) -> Option<CardRecord> {
    let caps = card_initial_re().captures(result)?;
    let initial_wrong: u32 = caps.get(1).and_then(|m| m.as_str().parse().ok())?;
    let total: u32 = caps.get(2).and_then(|m| m.as_str().parse().ok())?;

    let category = if descriptor.contains(SAT_TAG) {
        CardCategory::Sat
    } else {
        CardCategory::Toefl
    };
    let name = descriptor
        .rsplit_once("] ")
        .map_or(descriptor, |(_, after)| after)
        .trim()
        .to_owned();
    // Correction accuracy is measured against the initial total.
    let corrected_wrong = card_corrected_re()
        .captures(result)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<u32>().ok());
    let status = if result.contains(COMPLETED) {
        CardStatus::Completed
    } else {
        CardStatus::InProgress
    };

    Some(CardRecord {
        student: student.to_owned(),
        category,
        name,
        initial_wrong,
        total,
        initial_accuracy: card_accuracy(initial_wrong, total),
        corrected_wrong,
        corrected_accuracy: corrected_wrong.map(|w| card_accuracy(w, total)),
        status,
    })
}

fn modality_of(descriptor: &str) -> Modality {
    if descriptor.contains(LISTENING) {
        Modality::Listening
    } else {
        Modality::Reading
    }
}

/// First number in the descriptor, an `a~b` span preferred over a bare
/// number at the same position. `unknown` when nothing numeric appears.
fn range_of(descriptor: &str) -> String {
    range_re()
        .find(descriptor)
        .map(|m| m.as_str().to_owned())
        .unwrap_or_else(|| "unknown".to_owned())
}

fn capture_u32(re: &Regex, haystack: &str) -> Option<u32> {
    re.captures(haystack)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

fn block_split_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\n\s*\n").unwrap())
}

fn header_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(.+?)\s*:").unwrap())
}

// Result text runs to the next ASCII comma or the end of the block;
// the full-width `，` between fields stays inside it. A record on an
// inner line with neither terminator does not match, same as the
// platform's own export quirk.
fn record_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"【(词测|题卡) (.+?)】:\s*(.+?)(?:,\s*|$)").unwrap())
}

fn range_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"([0-9]+~[0-9]+)|([0-9]+)").unwrap())
}

fn word_count_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"词数：([0-9]+)").unwrap())
}

fn accuracy_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"正确率：([0-9]+)%").unwrap())
}

fn reaction_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"平均反应时间：([0-9.]+)\s*s").unwrap())
}

fn error_count_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"错误个数：([0-9]+)").unwrap())
}

fn card_initial_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"错误个数: ([0-9]+)/([0-9]+)").unwrap())
}

fn card_corrected_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"订正后错误个数: ([0-9]+)/([0-9]+)").unwrap())
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_TEST: &str = "小明 : 【词测 托福核心-英义-所有义-看测-2601~2700-100】: \
                             已完成 词数：100，正确率：95%，平均反应时间：3.67 s，错误个数：5";

    #[test]
    fn full_test_record_parses() {
        let outcome = scan_feed(FULL_TEST);
        assert_eq!(outcome.blocks.len(), 1);
        let block = &outcome.blocks[0];
        assert_eq!(block.student, "小明");
        assert_eq!(block.observations.len(), 1);

        let obs = &block.observations[0];
        assert_eq!(obs.accuracy, 95);
        let record = obs.record.as_ref().unwrap();
        assert_eq!(record.modality, Modality::Reading);
        assert_eq!(record.range, "2601~2700");
        assert_eq!(record.word_count, 100);
        assert!((record.reaction_secs - 3.67).abs() < 1e-9);
        assert_eq!(record.error_count, 5);
        assert!(outcome.diagnostics.is_clean());
    }

    #[test]
    fn splits_blocks_on_blank_lines() {
        let input = "小明 : 【词测 看测-100】: 正在进行\n\n  \n李雷 : 【词测 听测-200】: 正在进行";
        let blocks = split_blocks(input);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].name, "小明");
        assert_eq!(blocks[1].name, "李雷");
    }

    #[test]
    fn header_name_ends_at_first_colon() {
        let blocks = split_blocks("王:组长 : 【词测 看测-100】: 正在进行");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].name, "王");
    }

    #[test]
    fn header_colon_may_sit_on_the_next_line() {
        let blocks = split_blocks("李雷\n: 【词测 看测-100】: 正在进行");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].name, "李雷");
    }

    #[test]
    fn paragraph_without_header_is_dropped() {
        let input = "这一段没有冒号\n\n小明 : 【词测 看测-100】: 正在进行";
        let outcome = scan_feed(input);
        assert_eq!(outcome.blocks.len(), 1);
        assert_eq!(outcome.diagnostics.blocks_seen, 2);
        assert_eq!(outcome.diagnostics.blocks_dropped, 1);
        assert_eq!(
            outcome.diagnostics.warnings[0].reason,
            SkipReason::MissingHeader
        );
    }

    #[test]
    fn listening_marker_sets_modality() {
        let input = "小明 : 【词测 托福核心-听测-2601~2700】: 已完成 \
                     词数：50，正确率：90%，平均反应时间：2.00 s，错误个数：5";
        let outcome = scan_feed(input);
        let record = outcome.blocks[0].observations[0].record.as_ref().unwrap();
        assert_eq!(record.modality, Modality::Listening);
    }

    #[test]
    fn range_prefers_span_then_bare_number_then_unknown() {
        assert_eq!(range_of("托福核心-看测-2601~2700-100"), "2601~2700");
        assert_eq!(range_of("高频词汇-100-看测"), "100");
        assert_eq!(range_of("自定义词表-看测"), "unknown");
    }

    #[test]
    fn in_progress_test_is_not_an_observation() {
        let outcome = scan_feed("小明 : 【词测 看测-100】: 正在进行 正确率：40%");
        assert_eq!(outcome.blocks[0].observations.len(), 0);
        assert_eq!(outcome.diagnostics.tests_seen, 1);
        assert_eq!(outcome.diagnostics.tests_in_progress, 1);
        assert!(outcome.diagnostics.is_clean());
    }

    #[test]
    fn accuracy_only_test_counts_without_a_record() {
        let outcome = scan_feed("小明 : 【词测 看测-100】: 已完成 正确率：90%");
        let obs = &outcome.blocks[0].observations[0];
        assert_eq!(obs.accuracy, 90);
        assert!(obs.record.is_none());
        assert_eq!(outcome.diagnostics.tests_dropped, 1);
        assert_eq!(
            outcome.diagnostics.warnings[0].reason,
            SkipReason::IncompleteTest
        );
    }

    #[test]
    fn test_without_accuracy_contributes_nothing() {
        let outcome = scan_feed("小明 : 【词测 看测-100】: 已完成 词数：100");
        assert!(outcome.blocks[0].observations.is_empty());
        assert_eq!(outcome.diagnostics.tests_dropped, 1);
    }

    #[test]
    fn ascii_comma_terminates_a_result() {
        let input = "小明 : 【词测 看测-100】: 正在进行, 【词测 听测-200】: 已完成 \
                     词数：100，正确率：95%，平均反应时间：2.50 s，错误个数：5";
        let outcome = scan_feed(input);
        assert_eq!(outcome.diagnostics.tests_seen, 2);
        assert_eq!(outcome.diagnostics.tests_in_progress, 1);
        assert_eq!(outcome.blocks[0].observations.len(), 1);
        let record = outcome.blocks[0].observations[0].record.as_ref().unwrap();
        assert_eq!(record.range, "200");
    }

    #[test]
    fn unterminated_result_on_an_inner_line_is_not_a_record() {
        // No comma and no block end after the first result, so only the
        // final record matches.
        let input = "小明 : 【词测 看测-100】: 已完成 词数：100，正确率：95%，\
                     平均反应时间：2.50 s，错误个数：5\n【词测 看测-200】: 正在进行";
        let outcome = scan_feed(input);
        assert_eq!(outcome.diagnostics.tests_seen, 1);
        assert_eq!(outcome.diagnostics.tests_in_progress, 1);

        // A trailing comma on the inner line restores it.
        let fixed = "小明 : 【词测 看测-100】: 已完成 词数：100，正确率：95%，\
                     平均反应时间：2.50 s，错误个数：5,\n【词测 看测-200】: 正在进行";
        let outcome = scan_feed(fixed);
        assert_eq!(outcome.diagnostics.tests_seen, 2);
        assert_eq!(outcome.blocks[0].observations.len(), 1);
    }

    #[test]
    fn card_with_correction_parses() {
        let input = "小明 : 【题卡 [SAT] [填空] Unit 5】: 已完成 错误个数: 3/20，订正后错误个数: 1/20";
        let outcome = scan_feed(input);
        let card = &outcome.blocks[0].cards[0];
        assert_eq!(card.category, CardCategory::Sat);
        assert_eq!(card.name, "Unit 5");
        assert_eq!(card.initial_wrong, 3);
        assert_eq!(card.total, 20);
        assert_eq!(card.initial_accuracy, 85);
        assert_eq!(card.corrected_wrong, Some(1));
        assert_eq!(card.corrected_accuracy, Some(95));
        assert_eq!(card.status, CardStatus::Completed);
    }

    #[test]
    fn card_without_correction_or_completion() {
        let outcome = scan_feed("小明 : 【题卡 托福阅读】: 错误个数: 2/10");
        let card = &outcome.blocks[0].cards[0];
        assert_eq!(card.category, CardCategory::Toefl);
        assert_eq!(card.name, "托福阅读");
        assert_eq!(card.initial_accuracy, 80);
        assert_eq!(card.corrected_wrong, None);
        assert_eq!(card.corrected_accuracy, None);
        assert_eq!(card.status, CardStatus::InProgress);
    }

    #[test]
    fn card_name_takes_text_after_the_last_bracket() {
        let outcome = scan_feed("小明 : 【题卡 [TOEFL] [Unit 3] Day 5】: 错误个数: 1/10");
        assert_eq!(outcome.blocks[0].cards[0].name, "Day 5");
    }

    #[test]
    fn card_without_counts_is_dropped() {
        let outcome = scan_feed("小明 : 【题卡 [SAT] Unit 1】: 已完成");
        assert!(outcome.blocks[0].cards.is_empty());
        assert_eq!(outcome.diagnostics.cards_seen, 1);
        assert_eq!(outcome.diagnostics.cards_dropped, 1);
        assert_eq!(
            outcome.diagnostics.warnings[0].reason,
            SkipReason::IncompleteCard
        );
    }

    #[test]
    fn repeated_student_blocks_stay_separate() {
        let input = format!("{FULL_TEST}\n\n{FULL_TEST}");
        let outcome = scan_feed(&input);
        assert_eq!(outcome.blocks.len(), 2);
        assert_eq!(outcome.blocks[0].student, outcome.blocks[1].student);
    }

    #[test]
    fn empty_input_yields_nothing() {
        assert!(scan_feed("").blocks.is_empty());
        let outcome = scan_feed("  \n \n  ");
        assert!(outcome.blocks.is_empty());
        assert_eq!(outcome.diagnostics.blocks_seen, 0);
    }
}
