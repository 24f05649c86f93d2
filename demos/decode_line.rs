use nmea0183_sentence::{
    Assembly, Error, FragmentAssembler, SentenceRegistry, SentenceView,
    sentences::{AisSentence, GGA, RMC, XDR},
};

const LINES: [&str; 7] = [
    "$GPGGA,120044,6011.552,N,02501.941,E,1,00,2.0,28.0,M,19.6,M,,*79\r\n",
    "$GPRMC,120044.567,A,6011.552,N,02501.941,E,000.0,360.0,160705,006.1,E,A*0B\r\n",
    "$IIXDR,C,19.52,C,TempAir,P,1.02481,B,Barometer*7E\r\n",
    "!AIVDM,2,1,3,B,55?MbV02;H;s<HtKR20EHE:0@T4@Dn2222222216L961O5Gf0NSQEp6ClRp8,0*1D\r\n",
    "!AIVDM,2,2,3,B,88888888880,2*24\r\n",
    "$GPBOD,234.9,T,228.8,M,RUSKI,*1E\r\n",
    "$PGRME,15.0,M,45.0,M,25.0,M*1C\r\n",
];

fn describe(view: &dyn SentenceView, assembler: &mut FragmentAssembler) -> Result<(), Error> {
    if let Some(gga) = view.downcast_ref::<GGA>() {
        let position = gga.position()?;
        println!(
            "GGA fix at {:.5}, {:.5} with {} satellites",
            position.latitude(),
            position.longitude(),
            gga.satellites_in_use()?
        );
    } else if let Some(rmc) = view.downcast_ref::<RMC>() {
        println!("RMC {} at {} knots", rmc.status()?, rmc.speed()?);
    } else if let Some(xdr) = view.downcast_ref::<XDR>() {
        for measurement in xdr.measurements()? {
            println!("XDR {measurement:?}");
        }
    } else if let Some(ais) = view.downcast_ref::<AisSentence>() {
        match assembler.push(ais.clone())? {
            Assembly::Single(message) | Assembly::Complete(message) => {
                println!("AIS payload {} ({} fill bits)", message.payload, message.fill_bits);
            }
            Assembly::Pending => println!("AIS fragment, {} pending", assembler.pending()),
            Assembly::Discarded => println!("AIS fragment out of sequence"),
        }
    } else {
        println!("{}", view.sentence());
    }

    Ok(())
}

fn main() {
    let registry = SentenceRegistry::global();
    let mut assembler = FragmentAssembler::new();

    for line in LINES {
        let result = registry
            .create_parser(line)
            .and_then(|view| describe(view.as_ref(), &mut assembler));

        if let Err(e) = result {
            println!("{:?}: {}", line.trim_end(), e);
        }
    }
}
