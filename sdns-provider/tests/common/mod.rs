//! 共享测试工具和辅助函数

#![allow(dead_code)]

use std::time::Duration;

use sdns_provider::{Record, SdnsProvider};
use wiremock::MockServer;

/// 跳过测试的宏（当环境变量缺失时）
#[macro_export]
macro_rules! skip_if_no_credentials {
    ($($var:expr),+) => {
        $(
            if std::env::var($var).is_err() {
                eprintln!("跳过测试: 缺少环境变量 {}", $var);
                return;
            }
        )+
    };
}

pub const ZONE: &str = "example.com";

/// `GETZONE` export with the given SOA minimum TTL and `(host, type, value)` records.
pub fn zone_export(ttl: u32, records: &[(&str, &str, &str)]) -> String {
    let rrs: String = records
        .iter()
        .map(|(host, rtype, value)| format!(r#"  <rr host="{host}" type="{rtype}" value="{value}"/>"#))
        .collect::<Vec<_>>()
        .join("\n");
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<zone name="{ZONE}" reseller="acme">
  <soa refresh="3600" retry="900" expire="604800" mttl="{ttl}"/>
{rrs}
</zone>"#
    )
}

/// Mutation reply; `None` leaves `performedAction` off the record.
pub fn mutation_reply(status: &str, records: &[(&str, Option<&str>)]) -> String {
    let rrs: String = records
        .iter()
        .map(|(host, tag)| match tag {
            Some(tag) => format!(
                r#"<rr host="{host}" type="A" value="192.0.2.1" performedAction="{tag}"/>"#
            ),
            None => format!(r#"<rr host="{host}" type="A" value="192.0.2.1"/>"#),
        })
        .collect();
    format!(r#"<zoneRequest status="{status}" zone="{ZONE}" action="ADDORUPDATERR">{rrs}</zoneRequest>"#)
}

pub fn a_record(name: &str) -> Record {
    Record::new(name, "A", "192.0.2.1")
}

/// Provider pointed at the mock server.
pub fn provider_for(server: &MockServer) -> SdnsProvider {
    SdnsProvider::builder("test-ddns-key")
        .endpoint(format!("{}/", server.uri()))
        .timeout(Duration::from_secs(5))
        .build()
        .expect("创建 provider 失败")
}

/// Bodies of every request the server received, in order.
pub async fn received_bodies(server: &MockServer) -> Vec<String> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .into_iter()
        .map(|r| r.body.iter().map(|&b| char::from(b)).collect())
        .collect()
}
