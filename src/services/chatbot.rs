// src/services/chatbot.rs
use serde_json::{Map, Value};
use tracing::{info, warn};

use super::coze::preview;
use super::extract::extract_response;
use crate::{error::AppError, state::AppState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Generate,
    Validate,
    Sync,
    Help,
    Unknown,
}

/// Keywords per intent, in priority order. The first entry of each pair is
/// matched exactly, the second case-insensitively.
const KEYWORDS: &[(Intent, &str, &str)] = &[
    (Intent::Generate, "生成", "generate"),
    (Intent::Validate, "校验", "validate"),
    (Intent::Sync, "数据", "sync"),
    (Intent::Help, "帮助", "help"),
];

pub fn detect_intent(msg: &str) -> Intent {
    let msg_lower = msg.to_lowercase();

    KEYWORDS
        .iter()
        .find(|(_, native, latin)| msg.contains(*native) || msg_lower.contains(*latin))
        .map(|(intent, _, _)| *intent)
        .unwrap_or(Intent::Unknown)
}

/// Canned reply used when no workflow client is available.
pub fn demo_reply(user_msg: &str) -> String {
    use Intent::*;

    match detect_intent(user_msg) {
        Generate => concat!(
            "📋 已接收排班生成请求。我将为下周生成最优排班方案：\n\n",
            "✓ 夜班人数均匀分配（每晚 3-4 人）\n",
            "✓ 资深医生轮休安排\n",
            "✓ 新入职员工避免连续夜班\n\n",
            "预计 1-2 分钟内完成排班计算。"
        )
        .to_string(),

        Validate => concat!(
            "🔍 开始校验当前排班冲突...\n\n",
            "✅ 检查结果：\n",
            "  • 总班次: 42\n",
            "  • 冲突班次: 0\n",
            "  • 覆盖率: 100%\n\n",
            "✓ 排班无冲突，可以发布！"
        )
        .to_string(),

        Sync => concat!(
            "🔄 同步医院 HIS 系统数据...\n\n",
            "✓ 已同步内容：\n",
            "  • 医护人员信息: 152 人\n",
            "  • 科室部门: 18 个\n",
            "  • 班次规则: 8 套\n\n",
            "数据同步完成，可用于排班计算。"
        )
        .to_string(),

        Help => concat!(
            "🤖 我是医院排班智能助手，支持以下功能：\n\n",
            "1️⃣ 生成排班 - \"生成下周排班\"\n",
            "2️⃣ 校验排班 - \"校验当前排班\"\n",
            "3️⃣ 同步数据 - \"同步 HIS 数据\"\n",
            "4️⃣ 查询班次 - \"查看本月班次\"\n\n",
            "输入上述关键词，我会为你处理排班相关任务！"
        )
        .to_string(),

        Unknown => format!(
            concat!(
                "💬 我收到你的消息：\"{}\"\n\n",
                "我是医院排班智能助手，可以帮你：\n",
                "• 生成最优排班方案\n",
                "• 检测排班冲突\n",
                "• 同步员工和部门数据\n\n",
                "输入 \"帮助\" 了解更多功能！"
            ),
            user_msg
        ),
    }
}

/// Answer a trimmed, non-empty message with the workflow client when one is
/// configured, otherwise with a canned demo reply.
pub async fn generate_reply(state: &AppState, user_msg: &str) -> Result<String, AppError> {
    match (&state.client, state.config.workflow_id.as_deref()) {
        (Some(client), Some(workflow_id)) => {
            let mut parameters = Map::new();
            parameters.insert("input".to_string(), Value::String(user_msg.to_string()));

            let run = client
                .run_workflow(workflow_id, parameters)
                .await
                .inspect_err(|e| warn!(workflow_id, error = %e, "Coze workflow call failed"))?;
            info!(run = %preview(&run.to_string()), "Coze workflow returned");

            Ok(extract_response(&run))
        }
        _ => {
            info!(intent = ?detect_intent(user_msg), "answering in demo mode");
            Ok(demo_reply(user_msg))
        }
    }
}
