use super::rdata::RDataBuilder;
use super::record_type_map::RecordTypeMapper;
use hickory_proto::op::{Message, MessageType, OpCode, ResponseCode};
use hickory_proto::rr::{DNSClass, Name, Record};
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};
use hickory_server::authority::MessageResponseBuilder;
use hickory_server::server::{Request, RequestHandler, ResponseHandler, ResponseInfo};
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, error, info, warn};
use twodns_application::ports::RecordSink;
use twodns_application::use_cases::{
    ResolutionStatus, ResolveEncodedNameUseCase, ZoneAuthorityUseCase,
};
use twodns_domain::{DnsQuery, DnsRecord, DomainError, ZoneConfig};

/// Largest response sent over UDP without EDNS.
pub const MAX_UDP_RESPONSE: usize = 512;

/// Collects answer records for one question.
///
/// Records the wire layer cannot serialize, by type or by value, are
/// logged and skipped.
pub struct MessageRecordSink {
    name: Name,
    records: Vec<Record>,
}

impl MessageRecordSink {
    pub fn new(name: Name) -> Self {
        Self {
            name,
            records: Vec::new(),
        }
    }

    pub fn into_records(self) -> Vec<Record> {
        self.records
    }
}

impl RecordSink for MessageRecordSink {
    fn emit(&mut self, record: &DnsRecord, ttl: u32) -> Result<(), DomainError> {
        match RDataBuilder::build(record) {
            Ok(Some(rdata)) => {
                self.records
                    .push(Record::from_rdata(self.name.clone(), ttl, rdata));
            }
            Ok(None) => {
                warn!(record = %record, "Record type not serializable, skipping");
            }
            Err(e) => {
                warn!(record = %record, error = %e, "Record value not serializable, skipping");
            }
        }
        Ok(())
    }
}

/// Authoritative handler for the encoded zone.
///
/// UDP datagrams go through [`DnsServerHandler::handle_raw_udp`]; TCP is
/// served by hickory-server through the [`RequestHandler`] impl. Both end
/// in [`DnsServerHandler::handle_message`].
#[derive(Clone)]
pub struct DnsServerHandler {
    zone: Arc<ZoneConfig>,
    resolver: ResolveEncodedNameUseCase,
    authority: Arc<ZoneAuthorityUseCase>,
}

impl DnsServerHandler {
    pub fn new(zone: Arc<ZoneConfig>) -> Self {
        Self {
            authority: Arc::new(ZoneAuthorityUseCase::new(zone.clone())),
            resolver: ResolveEncodedNameUseCase::new(),
            zone,
        }
    }

    pub fn zone(&self) -> &ZoneConfig {
        &self.zone
    }

    fn normalize_domain(domain: &str) -> String {
        domain.trim_end_matches('.').to_ascii_lowercase()
    }

    /// Answer one UDP datagram.
    ///
    /// Returns `None` when nothing should be sent back: the input is a
    /// response, or too short to carry a message ID.
    pub fn handle_raw_udp(&self, query_buf: &[u8]) -> Option<Vec<u8>> {
        let request = match Message::from_vec(query_buf) {
            Ok(message) => message,
            Err(e) => {
                debug!(error = %e, len = query_buf.len(), "Unparsable DNS message");
                return format_error(query_buf);
            }
        };

        if request.message_type() != MessageType::Query {
            debug!(id = request.id(), "Ignoring DNS response message");
            return None;
        }

        let response = self.handle_message(&request);
        let bytes = match serialize_message(&response) {
            Ok(bytes) => bytes,
            Err(e) => {
                error!(error = %e, "Failed to serialize DNS response");
                let mut failure = response_header(&request);
                failure.set_response_code(ResponseCode::ServFail);
                return serialize_message(&failure).ok();
            }
        };

        fit_udp(&request, &response, bytes)
    }

    pub fn handle_message(&self, request: &Message) -> Message {
        let mut response = response_header(request);

        if request.op_code() != OpCode::Query {
            debug!(op_code = ?request.op_code(), "Unsupported opcode");
            response.set_response_code(ResponseCode::NotImp);
            return response;
        }

        let query = match request.queries() {
            [query] => query,
            queries => {
                debug!(count = queries.len(), "Expected exactly one question");
                response.set_response_code(ResponseCode::FormErr);
                return response;
            }
        };

        if query.query_class() != DNSClass::IN {
            debug!(class = ?query.query_class(), "Non-IN query class");
            response.set_response_code(ResponseCode::Refused);
            return response;
        }

        let domain = Self::normalize_domain(&query.name().to_ascii());
        let hickory_record_type = query.query_type();
        info!(domain = %domain, record_type = ?hickory_record_type, "DNS query received");

        if !self.authority.in_zone(&domain) {
            debug!(domain = %domain, "Name outside the zone");
            response.set_response_code(ResponseCode::Refused);
            return response;
        }

        let dns_query = DnsQuery::new(
            domain.as_str(),
            RecordTypeMapper::to_query_type(hickory_record_type),
        );
        let mut sink = MessageRecordSink::new(query.name().clone());

        let status = if self.authority.is_apex(&domain) {
            self.authority.execute(&dns_query, &mut sink)
        } else {
            self.resolver.execute(&dns_query, &self.zone, &mut sink)
        };

        let code = response_code(status);
        let answers = sink.into_records();
        debug!(domain = %domain, status = %status, answers = answers.len(), "Sending response");

        let negative = code == ResponseCode::NXDomain || answers.is_empty();
        let soa = if negative && code != ResponseCode::ServFail {
            match self.soa_authority() {
                Ok(soa) => Some(soa),
                Err(e) => {
                    error!(error = %e, "Failed to build SOA for authority section");
                    None
                }
            }
        } else {
            None
        };
        fill_response(&mut response, code, answers, soa);
        response
    }

    /// Zone SOA for negative answers, with the TTL capped at the SOA minimum.
    fn soa_authority(&self) -> Result<Record, DomainError> {
        let soa = self.authority.soa_record();
        let rdata = RDataBuilder::build(&soa)?
            .ok_or_else(|| DomainError::RecordEmission(soa.to_string()))?;
        let apex = Name::from_str(&format!("{}.", self.authority.zone_name()))
            .map_err(|e| DomainError::InvalidDomainName(e.to_string()))?;
        let ttl = self.zone.default_ttl.min(self.zone.minimum);
        Ok(Record::from_rdata(apex, ttl, rdata))
    }
}

#[async_trait::async_trait]
impl RequestHandler for DnsServerHandler {
    async fn handle_request<R: ResponseHandler>(
        &self,
        request: &Request,
        mut response_handle: R,
    ) -> ResponseInfo {
        let request_info = match request.request_info() {
            Ok(info) => info,
            Err(e) => {
                debug!(error = %e, "Failed to parse request info");
                return send_error_response(request, &mut response_handle, ResponseCode::FormErr)
                    .await;
            }
        };

        let header = request.header();
        let mut message = Message::new(header.id(), MessageType::Query, header.op_code());
        message.set_recursion_desired(header.recursion_desired());
        message.add_query(request_info.query.original().clone());

        let answer = self.handle_message(&message);
        let builder = MessageResponseBuilder::from_message_request(request);
        let response = builder.build(
            *answer.header(),
            answer.answers().iter(),
            answer.name_servers().iter(),
            &[],
            &[],
        );

        match response_handle.send_response(response).await {
            Ok(info) => info,
            Err(e) => {
                error!(error = %e, client = %request.src(), "Failed to send response");
                ResponseInfo::from(*request.header())
            }
        }
    }
}

async fn send_error_response<R: ResponseHandler>(
    request: &Request,
    response_handle: &mut R,
    code: ResponseCode,
) -> ResponseInfo {
    debug!(code = ?code, "Sending error response");
    let builder = MessageResponseBuilder::from_message_request(request);
    let mut header = *request.header();
    header.set_message_type(MessageType::Response);
    header.set_authoritative(true);
    header.set_response_code(code);
    let response = builder.build(header, &[], &[], &[], &[]);

    match response_handle.send_response(response).await {
        Ok(info) => info,
        Err(e) => {
            error!(error = %e, "Failed to send error response");
            ResponseInfo::from(*request.header())
        }
    }
}

/// Sets the code and sections of a response. A SERVFAIL never carries
/// records, even if some were collected before the failure.
fn fill_response(response: &mut Message, code: ResponseCode, answers: Vec<Record>, soa: Option<Record>) {
    response.set_response_code(code);
    if code == ResponseCode::ServFail {
        return;
    }
    for answer in answers {
        response.add_answer(answer);
    }
    if let Some(soa) = soa {
        response.add_name_server(soa);
    }
}

pub fn response_code(status: ResolutionStatus) -> ResponseCode {
    match status {
        ResolutionStatus::Success | ResolutionStatus::NoData => ResponseCode::NoError,
        ResolutionStatus::NotFound | ResolutionStatus::MalformedInput => ResponseCode::NXDomain,
        ResolutionStatus::InternalError => ResponseCode::ServFail,
    }
}

/// Authoritative response skeleton echoing the request's ID, opcode,
/// RD flag and question.
fn response_header(request: &Message) -> Message {
    let mut response = Message::new(request.id(), MessageType::Response, request.op_code());
    response.set_authoritative(true);
    response.set_recursion_desired(request.recursion_desired());
    for query in request.queries() {
        response.add_query(query.clone());
    }
    response
}

/// Replace an oversized UDP response with a truncated, answerless one.
fn fit_udp(request: &Message, response: &Message, bytes: Vec<u8>) -> Option<Vec<u8>> {
    if bytes.len() <= MAX_UDP_RESPONSE {
        return Some(bytes);
    }

    debug!(size = bytes.len(), "UDP response truncated");
    let mut truncated = response_header(request);
    truncated.set_response_code(response.response_code());
    truncated.set_truncated(true);
    serialize_message(&truncated).ok()
}

/// FORMERR carrying the ID of a message that could not be parsed.
fn format_error(query_buf: &[u8]) -> Option<Vec<u8>> {
    let id = u16::from_be_bytes([*query_buf.first()?, *query_buf.get(1)?]);
    let mut response = Message::new(id, MessageType::Response, OpCode::Query);
    response.set_response_code(ResponseCode::FormErr);
    serialize_message(&response).ok()
}

fn serialize_message(message: &Message) -> Result<Vec<u8>, DomainError> {
    let mut buf = Vec::with_capacity(MAX_UDP_RESPONSE);
    let mut encoder = BinEncoder::new(&mut buf);

    message.emit(&mut encoder).map_err(|e| {
        DomainError::RecordEmission(format!("Failed to serialize DNS message: {}", e))
    })?;

    Ok(buf)
}
