//! API 帮助函数

use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use serde::Serialize;

use crate::errors::GamedexError;

/// 错误响应体
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub error: &'static str,
    pub message: String,
}

/// 构建 JSON 响应
pub fn json_response<T: Serialize>(status: StatusCode, data: &T) -> HttpResponse {
    HttpResponse::build(status)
        .append_header(("Content-Type", "application/json; charset=utf-8"))
        .json(data)
}

/// 构建成功响应（200 OK）
pub fn success_response<T: Serialize>(data: T) -> HttpResponse {
    json_response(StatusCode::OK, &data)
}

/// 构建创建成功响应（201 Created）
pub fn created_response<T: Serialize>(data: T) -> HttpResponse {
    json_response(StatusCode::CREATED, &data)
}

/// 从 GamedexError 构建错误响应（自动映射 HTTP 状态码）
pub fn error_from(err: &GamedexError) -> HttpResponse {
    json_response(
        err.http_status(),
        &ErrorBody {
            code: err.code(),
            error: err.error_type(),
            message: err.message().to_string(),
        },
    )
}
