//! Append-only record of a tracking run for offline plotting and analysis.

use std::io::Write;

use rust_tracking_algo::Vector2;

/// One timestep of a run: truth, the measurement fed to the filter, and the
/// filter's position estimate.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ResultRecord {
    pub true_x: f64,
    pub true_y: f64,
    pub noisy_x: f64,
    pub noisy_y: f64,
    pub est_x: f64,
    pub est_y: f64,
}

impl ResultRecord {
    /// Build a record from truth, measurement and estimate positions
    pub fn new(truth: &Vector2, measurement: &Vector2, estimate: &Vector2) -> Self {
        Self {
            true_x: truth.x,
            true_y: truth.y,
            noisy_x: measurement.x,
            noisy_y: measurement.y,
            est_x: estimate.x,
            est_y: estimate.y,
        }
    }

    /// Get the true position
    pub fn truth(&self) -> Vector2 {
        Vector2::new(self.true_x, self.true_y)
    }

    /// Get the measured position
    pub fn measurement(&self) -> Vector2 {
        Vector2::new(self.noisy_x, self.noisy_y)
    }

    /// Get the estimated position
    pub fn estimate(&self) -> Vector2 {
        Vector2::new(self.est_x, self.est_y)
    }
}

/// Collects [`ResultRecord`]s in time order.
#[derive(Debug, Clone, Default)]
pub struct RunRecorder {
    records: Vec<ResultRecord>,
}

impl RunRecorder {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty recorder with room for `capacity` steps
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: Vec::with_capacity(capacity),
        }
    }

    /// Append one step
    pub fn push(&mut self, record: ResultRecord) {
        self.records.push(record);
    }

    /// Get all records in step order
    pub fn records(&self) -> &[ResultRecord] {
        &self.records
    }

    /// Get the most recent record
    pub fn last(&self) -> Option<&ResultRecord> {
        self.records.last()
    }

    /// Get the number of recorded steps
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check whether no step has been recorded
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Ground-truth track.
    pub fn truth(&self) -> impl Iterator<Item = Vector2> + '_ {
        self.records.iter().map(ResultRecord::truth)
    }

    /// Measurement track.
    pub fn measurements(&self) -> impl Iterator<Item = Vector2> + '_ {
        self.records.iter().map(ResultRecord::measurement)
    }

    /// Estimated track.
    pub fn estimates(&self) -> impl Iterator<Item = Vector2> + '_ {
        self.records.iter().map(ResultRecord::estimate)
    }

    /// Write every record as CSV with a header row.
    pub fn write_csv<W: Write>(&self, mut out: W) -> std::io::Result<()> {
        writeln!(out, "step,realx,realy,noisex,noisey,estx,esty")?;
        for (step, r) in self.records.iter().enumerate() {
            writeln!(
                out,
                "{},{:.6},{:.6},{:.6},{:.6},{:.6},{:.6}",
                step, r.true_x, r.true_y, r.noisy_x, r.noisy_y, r.est_x, r.est_y
            )?;
        }
        Ok(())
    }
}

/// Write a ground-truth walk as `step,x,y` CSV.
pub fn write_walk_csv<W, I>(mut out: W, positions: I) -> std::io::Result<()>
where
    W: Write,
    I: IntoIterator<Item = Vector2>,
{
    writeln!(out, "step,x,y")?;
    for (step, p) in positions.into_iter().enumerate() {
        writeln!(out, "{},{:.6},{:.6}", step, p.x, p.y)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::vector;

    fn record(i: f64) -> ResultRecord {
        ResultRecord::new(
            &vector![i, -i],
            &vector![i + 0.5, -i - 0.5],
            &vector![i + 0.1, -i - 0.1],
        )
    }

    #[test]
    fn test_recorder_push_and_get() {
        let mut recorder = RunRecorder::new();
        recorder.push(record(1.0));
        recorder.push(record(2.0));
        recorder.push(record(3.0));

        assert_eq!(recorder.len(), 3);
        let truth: Vec<_> = recorder.truth().map(|p| p.x).collect();
        assert_eq!(truth, vec![1.0, 2.0, 3.0]);
        assert_eq!(recorder.last().map(|r| r.noisy_y), Some(-3.5));
        assert_eq!(recorder.estimates().count(), 3);
        assert_eq!(recorder.measurements().next(), Some(vector![1.5, -1.5]));
    }

    #[test]
    fn test_recorder_csv() {
        let mut recorder = RunRecorder::with_capacity(2);
        recorder.push(record(1.0));
        recorder.push(record(2.0));

        let mut buf = Vec::new();
        recorder.write_csv(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "step,realx,realy,noisex,noisey,estx,esty");
        assert_eq!(
            lines[1],
            "0,1.000000,-1.000000,1.500000,-1.500000,1.100000,-1.100000"
        );
        assert!(lines[2].starts_with("1,2.000000,"));
    }

    #[test]
    fn test_walk_csv() {
        let mut buf = Vec::new();
        write_walk_csv(&mut buf, vec![vector![0.0, 0.0], vector![0.25, -1.0]]).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text, "step,x,y\n0,0.000000,0.000000\n1,0.250000,-1.000000\n");
    }

    #[test]
    fn test_empty_recorder() {
        let recorder = RunRecorder::new();
        assert!(recorder.is_empty());
        assert!(recorder.last().is_none());
    }
}
