//! 이메일 발송.
//!
//! Gmail SMTP(STARTTLS)로 리포트를 발송합니다. 자격증명은 환경
//! 변수(`GMAIL_ADDRESS`, `GMAIL_APP_PASSWORD`, `RECIPIENT_EMAIL`)로만
//! 전달합니다. 발송 실패는 호출자가 로그로 처리하며, 파이프라인을
//! 중단시키지 않습니다.

use lettre::message::header::ContentType;
use lettre::message::{Attachment, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use std::path::Path;
use tracing::info;

use ranker_core::EmailConfig;

use crate::error::{ReportError, ReportResult};

/// SMTP 리포트 발송기.
pub struct EmailSender {
    config: EmailConfig,
    sender_address: String,
    app_password: String,
    recipient: String,
}

impl EmailSender {
    /// 환경 변수에서 발송기를 생성합니다.
    ///
    /// 필수 변수가 하나라도 없으면 `MissingCredential` 에러를
    /// 반환합니다.
    pub fn from_env(config: &EmailConfig) -> ReportResult<Self> {
        let sender_address = require_env("GMAIL_ADDRESS")?;
        let app_password = require_env("GMAIL_APP_PASSWORD")?;
        let recipient = require_env("RECIPIENT_EMAIL")?;

        Ok(Self {
            config: config.clone(),
            sender_address,
            app_password,
            recipient,
        })
    }

    /// 본문과 첨부 파일 목록으로 리포트 이메일을 발송합니다.
    pub fn send_report(
        &self,
        subject: &str,
        body: &str,
        attachments: &[&Path],
    ) -> ReportResult<()> {
        let mut multipart = MultiPart::mixed().singlepart(
            SinglePart::builder()
                .header(ContentType::TEXT_PLAIN)
                .body(body.to_string()),
        );

        for path in attachments {
            let filename = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| "report".to_string());
            let content = std::fs::read(path)?;
            let content_type = guess_content_type(&filename);
            multipart = multipart.singlepart(
                Attachment::new(filename).body(content, content_type),
            );
        }

        let email = Message::builder()
            .from(
                self.sender_address
                    .parse()
                    .map_err(|e| ReportError::EmailBuild(format!("발신 주소 파싱 실패: {e}")))?,
            )
            .to(self
                .recipient
                .parse()
                .map_err(|e| ReportError::EmailBuild(format!("수신 주소 파싱 실패: {e}")))?)
            .subject(subject)
            .multipart(multipart)
            .map_err(|e| ReportError::EmailBuild(format!("메시지 구성 실패: {e}")))?;

        let transport = self.create_transport()?;
        transport
            .send(&email)
            .map_err(|e| ReportError::EmailSend(e.to_string()))?;

        info!(
            recipient = %self.recipient,
            attachments = attachments.len(),
            "리포트 이메일 발송 완료"
        );
        Ok(())
    }

    fn create_transport(&self) -> ReportResult<SmtpTransport> {
        let credentials = Credentials::new(
            self.sender_address.clone(),
            self.app_password.clone(),
        );
        let transport = SmtpTransport::starttls_relay(&self.config.smtp_host)
            .map_err(|e| ReportError::EmailSend(format!("SMTP 설정 실패: {e}")))?
            .port(self.config.smtp_port)
            .credentials(credentials)
            .build();
        Ok(transport)
    }
}

fn require_env(key: &str) -> ReportResult<String> {
    std::env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| ReportError::MissingCredential(key.to_string()))
}

fn guess_content_type(filename: &str) -> ContentType {
    if filename.ends_with(".html") {
        ContentType::TEXT_HTML
    } else if filename.ends_with(".csv") {
        ContentType::parse("text/csv").unwrap_or(ContentType::TEXT_PLAIN)
    } else if filename.ends_with(".png") {
        ContentType::parse("image/png").unwrap_or(ContentType::TEXT_PLAIN)
    } else {
        ContentType::TEXT_PLAIN
    }
}
