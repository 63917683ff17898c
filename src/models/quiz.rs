use serde::Serialize;
use serde_json::Value;

/// 文本出题请求体
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextQuizRequest<'a> {
    pub text: &'a str,
    pub num_questions: i64,
}

/// 出题接口返回的结果
///
/// 对客户端来说是不透明的，只用来展示 `numQuestions`。
/// 服务端返回的任何非空内容都算生成成功。
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GeneratedQuiz {
    body: Value,
}

/// 按页面上的判断方式：null、false、0、空字符串视为没有值
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// 展示用的文本：字符串原样输出，其它值输出 JSON
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

impl GeneratedQuiz {
    /// 从响应体构造，没有值时返回 None
    pub fn from_value(body: Value) -> Option<Self> {
        is_truthy(&body).then_some(Self { body })
    }

    /// 从原始响应文本构造
    ///
    /// 不是 JSON 的内容按字符串保存
    pub fn from_body_text(text: &str) -> Option<Self> {
        if text.trim().is_empty() {
            return None;
        }
        let body = serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()));
        Self::from_value(body)
    }

    pub fn body(&self) -> &Value {
        &self.body
    }

    /// 服务端返回的 `numQuestions`，原样保留
    pub fn num_questions(&self) -> Option<&Value> {
        self.body.get("numQuestions").filter(|v| !v.is_null())
    }

    /// 确认信息里显示的题目数，缺失时为空串
    pub fn num_questions_label(&self) -> String {
        self.num_questions().map(display_value).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_request_uses_camel_case() {
        let body = serde_json::to_value(TextQuizRequest {
            text: "cells",
            num_questions: 7,
        })
        .unwrap();
        assert_eq!(body, json!({ "text": "cells", "numQuestions": 7 }));
    }

    #[test]
    fn test_keeps_whole_body() {
        let quiz = GeneratedQuiz::from_value(json!({
            "numQuestions": 12,
            "quizId": "abc",
            "questions": []
        }))
        .unwrap();
        assert_eq!(quiz.num_questions_label(), "12");
        assert_eq!(quiz.body()["quizId"], "abc");
    }

    #[test]
    fn test_count_of_any_shape_is_displayed() {
        let string_count = GeneratedQuiz::from_value(json!({ "numQuestions": "12" })).unwrap();
        assert_eq!(string_count.num_questions_label(), "12");

        let float_count = GeneratedQuiz::from_value(json!({ "numQuestions": 12.0 })).unwrap();
        assert_eq!(float_count.num_questions_label(), "12.0");

        let negative = GeneratedQuiz::from_value(json!({ "numQuestions": -1 })).unwrap();
        assert_eq!(negative.num_questions_label(), "-1");

        let missing = GeneratedQuiz::from_value(json!({ "quizId": "q" })).unwrap();
        assert_eq!(missing.num_questions_label(), "");
    }

    #[test]
    fn test_falsy_bodies_are_no_result() {
        for body in [Value::Null, json!(false), json!(0), json!("")] {
            assert!(GeneratedQuiz::from_value(body).is_none());
        }
    }

    #[test]
    fn test_plain_text_body_is_a_result() {
        let quiz = GeneratedQuiz::from_body_text("Quiz created").unwrap();
        assert_eq!(quiz.body(), &json!("Quiz created"));
        assert!(GeneratedQuiz::from_body_text("  \n").is_none());
        assert!(GeneratedQuiz::from_body_text("null").is_none());
    }
}
