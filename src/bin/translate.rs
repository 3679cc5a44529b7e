//! Interactive command-line driver for the translation service.

use opus_translate::{
    MarianLoader, ModelRegistry, SessionContext, TranslationService, TranslatorConfig,
    TranslatorError, LANGUAGE_OPTIONS, RECENT_DISPLAY_COUNT,
};
use std::io::{self, BufRead, Write};
use std::sync::Arc;

fn main() -> Result<(), TranslatorError> {
    env_logger::init();

    let config = TranslatorConfig::default();
    let loader = Box::new(MarianLoader::new(config.decoding.clone()));
    let registry = Arc::new(ModelRegistry::new(loader, &config));
    for (pair, err) in registry.warm_up() {
        eprintln!("warning: could not preload {}: {}", pair, err);
    }

    let service = TranslationService::new(registry);
    let mut session = SessionContext::new();

    println!("Languages:");
    for (name, code) in LANGUAGE_OPTIONS.iter() {
        println!("  {} ({})", name, code);
    }
    println!("Commands: :swap reverses the direction, :history shows recent translations, :quit exits.");

    let stdin = io::stdin();
    loop {
        print!("{} -> {} > ", session.source_lang(), session.target_lang());
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        match line {
            ":quit" => break,
            ":swap" => {
                session.swap_languages();
                continue;
            }
            ":history" => {
                print_history(&session);
                continue;
            }
            _ => {}
        }

        match service.translate(&mut session, line) {
            Ok(translation) => println!("{}", translation.output_text),
            Err(err) => eprintln!("error: {}", err),
        }
    }
    Ok(())
}

fn print_history(session: &SessionContext) {
    let recent = session.history().recent(RECENT_DISPLAY_COUNT);
    if recent.is_empty() {
        println!("no translations yet");
        return;
    }
    for entry in recent {
        println!(
            "[{}] {} -> {}: {} => {}",
            entry.display_time(),
            entry.source_lang,
            entry.target_lang,
            entry.input_text,
            entry.output_text
        );
    }
}
