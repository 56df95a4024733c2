pub const LISTEN_ADDR: &str = "127.0.0.1:8080";

pub const ENDPOINT_PATH: &str = "/save_message";

pub const CLIENT_ENDPOINT: &str = "http://127.0.0.1:8080/save_message";

pub const CLIENT_TIMEOUT_SECS: u64 = 30;

pub const SUCCESS_MARKER: &str = "✅";

pub const FAILURE_MARKER: &str = "❌";

pub const SUCCESS_MESSAGE: &str = "✅ Tin nhắn đã được lưu thành công!";

pub const FAILURE_PREFIX: &str = "❌ Lỗi khi lưu: ";

pub const CONNECTION_FAILED_PREFIX: &str = "Kết nối thất bại: ";

pub const PREPARE_FAILED_PREFIX: &str = "Lỗi prepare: ";

pub const NOT_POST_MESSAGE: &str = "Form chưa được gửi bằng POST.";

pub const NETWORK_ERROR_MESSAGE: &str = "Lỗi kết nối, vui lòng thử lại sau.";

pub const IN_PROGRESS_MESSAGE: &str = "Tin nhắn đang được gửi, vui lòng chờ.";

pub const STORAGE_PATH: &str = "contact_form.db";
