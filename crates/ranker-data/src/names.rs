//! 종목 코드 → 표시 이름 조회.

use ranker_core::StockCode;

/// 주요 종목 코드와 한글 종목명 테이블.
///
/// 테이블에 없는 코드는 코드 자체를 이름으로 사용합니다. 조회는 절대
/// 실패하지 않습니다.
const STOCK_NAMES: &[(&str, &str)] = &[
    ("005930", "삼성전자"),
    ("000660", "SK하이닉스"),
    ("035420", "NAVER"),
    ("035720", "카카오"),
    ("005380", "현대차"),
    ("051910", "LG화학"),
    ("006400", "삼성SDI"),
    ("005490", "POSCO홀딩스"),
    ("028260", "삼성물산"),
    ("012330", "현대모비스"),
    ("068270", "셀트리온"),
    ("207940", "삼성바이오로직스"),
    ("086790", "하나금융지주"),
    ("105560", "KB금융"),
    ("055550", "신한지주"),
];

/// 종목 코드의 표시 이름을 반환합니다.
pub fn lookup_display_name(code: &StockCode) -> String {
    STOCK_NAMES
        .iter()
        .find(|(c, _)| *c == code.as_str())
        .map(|(_, name)| name.to_string())
        .unwrap_or_else(|| code.to_string())
}
