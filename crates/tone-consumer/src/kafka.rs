use anyhow::Result;
use rdkafka::config::ClientConfig;
use rdkafka::consumer::{Consumer, StreamConsumer};
use rdkafka::error::KafkaError;
use rdkafka::message::Message;

use tone_pipeline::{RecordSource, SourceRecord};

use crate::config::Config;

/// Kafka subscription backed by a librdkafka stream consumer.
pub struct KafkaSource {
    consumer: StreamConsumer,
}

impl KafkaSource {
    pub fn subscribe(config: &Config) -> Result<Self> {
        let consumer: StreamConsumer = ClientConfig::new()
            .set("bootstrap.servers", &config.brokers)
            .set("group.id", &config.group_id)
            .set("auto.offset.reset", config.offset_reset.as_str())
            .set("enable.auto.commit", "true")
            .create()?;

        consumer.subscribe(&[config.topic.as_str()])?;
        Ok(Self { consumer })
    }
}

impl RecordSource for KafkaSource {
    type Error = KafkaError;

    async fn next_record(&mut self) -> Option<Result<SourceRecord, KafkaError>> {
        let record = self.consumer.recv().await.map(|msg| SourceRecord {
            topic: msg.topic().to_string(),
            partition: msg.partition(),
            offset: msg.offset(),
            payload: msg.payload().map(<[u8]>::to_vec),
        });
        Some(record)
    }

    fn close(self) -> Result<(), KafkaError> {
        // Dropping the consumer leaves the group.
        self.consumer.unsubscribe();
        Ok(())
    }
}
