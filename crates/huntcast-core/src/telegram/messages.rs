use crate::ai::AnalysisResult;
use crate::trends::{Period, TrendingItem};

pub const TELEGRAM_MESSAGE_LIMIT: usize = 4096;

const TAGLINE_TITLE_CHARS: usize = 50;

/// Channel-facing label set for one output language
pub struct Labels {
    pub daily_title: &'static str,
    pub weekly_title: &'static str,
    pub monthly_title: &'static str,
    pub directory_heading: &'static str,
    pub trend_summary: &'static str,
    pub votes: &'static str,
    pub topics: &'static str,
    pub view_details: &'static str,
    pub products_counted: &'static str,
    pub data_source: &'static str,
    pub no_items: &'static str,
    pub daily_task_failed: &'static str,
    pub weekly_task_failed: &'static str,
    pub monthly_task_failed: &'static str,
}

static EN: Labels = Labels {
    daily_title: "Today's Product Hunt Top Products",
    weekly_title: "This Week's Product Hunt Top Products",
    monthly_title: "This Month's Product Hunt Top Products",
    directory_heading: "Product Directory",
    trend_summary: "Trend Summary",
    votes: "Votes",
    topics: "Topics",
    view_details: "View Details",
    products_counted: "products",
    data_source: "Source: Product Hunt",
    no_items: "No trending products were available for this period.",
    daily_task_failed: "Daily digest task failed",
    weekly_task_failed: "Weekly digest task failed",
    monthly_task_failed: "Monthly digest task failed",
};

static ZH: Labels = Labels {
    daily_title: "今日Product Hunt热门产品",
    weekly_title: "本周Product Hunt热门产品",
    monthly_title: "本月Product Hunt热门产品",
    directory_heading: "产品目录",
    trend_summary: "趋势总结",
    votes: "票数",
    topics: "标签",
    view_details: "查看详情",
    products_counted: "个产品",
    data_source: "数据来源：Product Hunt",
    no_items: "本期没有可分析的热门产品。",
    daily_task_failed: "日报任务执行失败",
    weekly_task_failed: "周报任务执行失败",
    monthly_task_failed: "月报任务执行失败",
};

impl Labels {
    pub fn for_language(code: &str) -> &'static Labels {
        match code {
            "zh" => &ZH,
            _ => &EN,
        }
    }

    pub fn title_for(&self, period: Period) -> &'static str {
        match period {
            Period::Daily => self.daily_title,
            Period::Weekly => self.weekly_title,
            Period::Monthly => self.monthly_title,
        }
    }

    pub fn task_failed_for(&self, period: Period) -> &'static str {
        match period {
            Period::Daily => self.daily_task_failed,
            Period::Weekly => self.weekly_task_failed,
            Period::Monthly => self.monthly_task_failed,
        }
    }

    fn emoji_for(period: Period) -> &'static str {
        match period {
            Period::Daily => "🌅",
            Period::Weekly => "📅",
            Period::Monthly => "📊",
        }
    }
}

pub fn truncate_chars(input: &str, max_chars: usize) -> &str {
    match input.char_indices().nth(max_chars) {
        Some((idx, _)) => &input[..idx],
        None => input,
    }
}

/// The single pinned directory message: item list plus overall summary
pub fn render_directory(
    labels: &Labels,
    period: Period,
    items: &[TrendingItem],
    summary: &str,
) -> String {
    let mut parts = vec![
        format!("{} **{}**", Labels::emoji_for(period), labels.title_for(period)),
        String::new(),
        format!("📋 **{}:**", labels.directory_heading),
    ];

    for (i, item) in items.iter().enumerate() {
        parts.push(format!(
            "{:2}. [{}]({}) | 👍{}",
            i + 1,
            item.name,
            item.url,
            item.votes_count
        ));
    }

    parts.extend([
        String::new(),
        format!("📊 **{}:**", labels.trend_summary),
        summary.to_string(),
        String::new(),
        format!(
            "📱 {} {} | {}",
            items.len(),
            labels.products_counted,
            labels.data_source
        ),
    ]);

    let text = parts.join("\n");
    truncate_chars(&text, TELEGRAM_MESSAGE_LIMIT).to_string()
}

/// One per-item message. Uses the AI commentary when the analysis carries
/// one for this item, the item's own metadata otherwise.
pub fn render_item(labels: &Labels, item: &TrendingItem, commentary: Option<&str>) -> String {
    let title = if item.tagline.trim().is_empty() {
        format!("📝 【{}】", item.name)
    } else {
        let tagline = truncate_chars(item.tagline.trim(), TAGLINE_TITLE_CHARS);
        format!("📝 【{}：{}】", item.name, tagline)
    };

    let body = match commentary {
        Some(text) => text.to_string(),
        None => item.description.clone(),
    };

    let mut parts = vec![title, String::new(), body, String::new()];

    if !item.topics.is_empty() {
        parts.push(format!("🏷️ {}：{}", labels.topics, item.topics.join(", ")));
    }
    parts.push(format!("👍 {}：{}", labels.votes, item.votes_count));
    parts.push(String::new());
    parts.push(format!("🔗 [{}]({})", labels.view_details, item.url));

    let text = parts.join("\n");
    truncate_chars(&text, TELEGRAM_MESSAGE_LIMIT).to_string()
}

/// Convenience wrapper picking the commentary out of an AnalysisResult
pub fn render_item_from_analysis(
    labels: &Labels,
    item: &TrendingItem,
    analysis: &AnalysisResult,
) -> String {
    render_item(labels, item, analysis.commentary_for(&item.id))
}
