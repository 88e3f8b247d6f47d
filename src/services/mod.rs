pub mod chatbot;
pub mod coze;
pub mod extract;
