//! Distance command implementation

use crate::cli::DistanceArgs;
use crate::output::OutputWriter;
use crate::output_types::DistanceOutput;
use anyhow::Result;
use geopoint_core::models::Point;

pub fn execute(args: DistanceArgs, output: &OutputWriter) -> Result<()> {
    let from = Point::new("from", args.lon1, args.lat1, None, None)?;
    let to = Point::new("to", args.lon2, args.lat2, None, None)?;
    let meters = from.distance_to(&to);

    if output.is_json() {
        return output.result(DistanceOutput {
            from: [from.lon(), from.lat()],
            to: [to.lon(), to.lat()],
            meters,
            kilometers: meters / 1000.0,
        });
    }

    output.kv("From", format!("({}, {})", from.lon(), from.lat()));
    output.kv("To", format!("({}, {})", to.lon(), to.lat()));
    output.success(format!("{:.1} m ({:.3} km)", meters, meters / 1000.0));

    Ok(())
}
