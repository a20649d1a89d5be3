use super::Event;

use log::{debug, warn};
use std::io::BufRead;
use std::sync::mpsc::Sender;
use std::thread;

pub fn spawn_line_reader<R>(reader: R, sender: Sender<Event>) -> std::io::Result<()>
where
    R: BufRead + Send + 'static,
{
    thread::Builder::new()
        .name("input".to_string())
        .spawn(move || {
            for line in reader.lines() {
                match line {
                    Ok(line) => {
                        if sender.send(Event::Line(line)).is_err() {
                            return;
                        }
                    }
                    Err(error) => {
                        warn!("unable to read input : {}", error);
                        break;
                    }
                }
            }
            debug!("end of input");
            let _ = sender.send(Event::Closed);
        })?;
    Ok(())
}
