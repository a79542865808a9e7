#![allow(dead_code)]
use hickory_proto::op::{Message, MessageType, OpCode, Query};
use hickory_proto::rr::{DNSClass, Name, RecordType};
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};
use std::str::FromStr;
use std::sync::Arc;
use twodns_domain::ZoneConfig;
use twodns_infrastructure::dns::DnsServerHandler;

pub const QUERY_ID: u16 = 0x2D05;

pub fn handler() -> DnsServerHandler {
    DnsServerHandler::new(Arc::new(ZoneConfig::default()))
}

pub fn handler_with(zone: ZoneConfig) -> DnsServerHandler {
    DnsServerHandler::new(Arc::new(zone))
}

pub struct QueryBuilder {
    message: Message,
    query: Query,
}

impl QueryBuilder {
    pub fn new(name: &str, record_type: RecordType) -> Self {
        let mut query = Query::new();
        query.set_name(Name::from_str(name).unwrap());
        query.set_query_type(record_type);
        query.set_query_class(DNSClass::IN);

        let mut message = Message::new(QUERY_ID, MessageType::Query, OpCode::Query);
        message.set_recursion_desired(true);

        Self { message, query }
    }

    pub fn class(mut self, class: DNSClass) -> Self {
        self.query.set_query_class(class);
        self
    }

    pub fn op_code(mut self, op_code: OpCode) -> Self {
        self.message.set_op_code(op_code);
        self
    }

    pub fn message(mut self) -> Message {
        self.message.add_query(self.query);
        self.message
    }

    pub fn bytes(self) -> Vec<u8> {
        encode(&self.message())
    }
}

pub fn encode(message: &Message) -> Vec<u8> {
    let mut buf = Vec::new();
    let mut encoder = BinEncoder::new(&mut buf);
    message.emit(&mut encoder).unwrap();
    buf
}

/// Send `name`/`record_type` through the UDP path and parse the reply.
pub fn ask(handler: &DnsServerHandler, name: &str, record_type: RecordType) -> Message {
    let bytes = QueryBuilder::new(name, record_type).bytes();
    let response = handler.handle_raw_udp(&bytes).unwrap();
    Message::from_vec(&response).unwrap()
}
