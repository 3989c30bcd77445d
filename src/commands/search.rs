/*!
 * 命令搜索与排序
 *
 * 评分规则：
 * - 标题完全匹配 100，前缀匹配 80，包含 60（三者互斥）
 * - 描述包含 +40，关键词包含 +30，类别包含 +20（可叠加）
 * - 以上均未命中时，对标题做子序列模糊匹配，匹配率超过 0.5 时得分
 *   `floor(匹配率 * 20)`，否则排除
 *
 * 排序：得分降序，优先级降序，标题字母序。
 */

use super::types::CommandDescriptor;
use std::cmp::Ordering;
use std::sync::Arc;

pub const EXACT_TITLE_SCORE: u32 = 100;
pub const TITLE_PREFIX_SCORE: u32 = 80;
pub const TITLE_CONTAINS_SCORE: u32 = 60;
pub const DESCRIPTION_SCORE: u32 = 40;
pub const KEYWORD_SCORE: u32 = 30;
pub const CATEGORY_SCORE: u32 = 20;
pub const FUZZY_WEIGHT: f64 = 20.0;
pub const FUZZY_THRESHOLD: f64 = 0.5;

/// 带得分的搜索结果
#[derive(Debug, Clone)]
pub struct ScoredCommand {
    pub descriptor: Arc<CommandDescriptor>,
    pub score: u32,
}

/// 去除首尾空白并转为小写
pub fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

/// 计算命令对查询的得分，0 表示不匹配
///
/// `query` 需要已经过 [`normalize_query`] 处理。
pub fn score_command(descriptor: &CommandDescriptor, query: &str) -> u32 {
    if query.is_empty() {
        return 0;
    }

    let title = descriptor.title.to_lowercase();

    let mut score = if title == query {
        EXACT_TITLE_SCORE
    } else if title.starts_with(query) {
        TITLE_PREFIX_SCORE
    } else if title.contains(query) {
        TITLE_CONTAINS_SCORE
    } else {
        0
    };

    if let Some(description) = &descriptor.description {
        if description.to_lowercase().contains(query) {
            score += DESCRIPTION_SCORE;
        }
    }

    if descriptor.keywords.join(" ").to_lowercase().contains(query) {
        score += KEYWORD_SCORE;
    }

    if descriptor.category.as_str().contains(query) {
        score += CATEGORY_SCORE;
    }

    if score == 0 {
        if let Some(ratio) = subsequence_ratio(query, &title) {
            if ratio > FUZZY_THRESHOLD {
                score = (ratio * FUZZY_WEIGHT).floor() as u32;
            }
        }
    }

    score
}

/// 子序列匹配率
///
/// 从左到右贪心地匹配查询字符，只有全部字符按顺序匹配时才返回
/// `匹配字符数 / 目标长度`，否则返回 `None`。长度按字符计算。
pub fn subsequence_ratio(query: &str, target: &str) -> Option<f64> {
    let target_len = target.chars().count();
    if query.is_empty() || target_len == 0 {
        return None;
    }

    let mut pending = query.chars().peekable();
    let mut matched = 0usize;

    for c in target.chars() {
        match pending.peek() {
            Some(&expected) if expected == c => {
                matched += 1;
                pending.next();
            }
            Some(_) => {}
            None => break,
        }
    }

    if pending.peek().is_some() {
        return None;
    }

    Some(matched as f64 / target_len as f64)
}

/// 对候选命令评分并排序，隐藏命令和未命中的命令被排除
pub fn rank<I>(candidates: I, query: &str) -> Vec<ScoredCommand>
where
    I: IntoIterator<Item = Arc<CommandDescriptor>>,
{
    let mut scored: Vec<ScoredCommand> = candidates
        .into_iter()
        .filter(|descriptor| !descriptor.hidden)
        .filter_map(|descriptor| {
            let score = score_command(&descriptor, query);
            (score > 0).then_some(ScoredCommand { descriptor, score })
        })
        .collect();

    scored.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then_with(|| b.descriptor.priority.cmp(&a.descriptor.priority))
            .then_with(|| compare_titles(&a.descriptor.title, &b.descriptor.title))
    });

    scored
}

/// 不区分大小写的标题比较，大小写不同的同名标题再按原文比较
pub fn compare_titles(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}
