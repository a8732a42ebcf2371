use prometheus::{
    Encoder, GaugeVec, IntCounterVec, IntGauge, Opts, Registry, TextEncoder,
};
use sentiment_fls::{ClassificationReport, Defuzzification};
use swn_lexicon::Lexicon;

pub struct ClassificationMetrics {
    registry: Registry,
    pub classification_value: GaugeVec,
    pub rule_firing_strength: GaugeVec,
    pub evaluations_total: IntCounterVec,
    pub lexicon_terms: IntGauge,
}

impl ClassificationMetrics {
    pub fn new(registry: &Registry) -> prometheus::Result<Self> {
        let classification_value = GaugeVec::new(
            Opts::new(
                "sentiment_classification_value",
                "Last crisp classification per defuzzification mode",
            ),
            &["mode"],
        )?;
        let rule_firing_strength = GaugeVec::new(
            Opts::new(
                "sentiment_rule_firing_strength",
                "Firing strength of each rule in the last report",
            ),
            &["rule"],
        )?;
        let evaluations_total = IntCounterVec::new(
            Opts::new(
                "sentiment_evaluations_total",
                "Classifications computed per defuzzification mode",
            ),
            &["mode"],
        )?;
        let lexicon_terms = IntGauge::new(
            "sentiment_lexicon_terms",
            "Distinct term#pos keys in the loaded lexicon",
        )?;

        registry.register(Box::new(classification_value.clone()))?;
        registry.register(Box::new(rule_firing_strength.clone()))?;
        registry.register(Box::new(evaluations_total.clone()))?;
        registry.register(Box::new(lexicon_terms.clone()))?;

        Ok(Self {
            registry: registry.clone(),
            classification_value,
            rule_firing_strength,
            evaluations_total,
            lexicon_terms,
        })
    }

    pub fn observe_classification(&self, mode: Defuzzification, value: f64) {
        self.classification_value
            .with_label_values(&[mode.as_str()])
            .set(value);
        self.evaluations_total
            .with_label_values(&[mode.as_str()])
            .inc();
    }

    pub fn observe_report(&self, report: &ClassificationReport) {
        self.observe_classification(Defuzzification::Height, report.height);
        self.observe_classification(Defuzzification::Centroid, report.centroid);
        for (index, firing) in report.firings.iter().enumerate() {
            let rule = (index + 1).to_string();
            self.rule_firing_strength
                .with_label_values(&[rule.as_str()])
                .set(firing.strength);
        }
    }

    pub fn observe_lexicon(&self, lexicon: &Lexicon) {
        self.lexicon_terms.set(lexicon.len() as i64);
    }

    /// Text exposition of everything registered in the backing registry.
    pub fn render(&self) -> prometheus::Result<String> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}
