use std::time::Duration;

use tokio::io::AsyncReadExt;
use tokio::net::TcpListener;
use zpl_printer::{
    BatchState, LabelRequest, LabelSize, NetworkPrinter, PrintJob, PrinterEndpoint,
};

async fn local_printer() -> (TcpListener, PrinterEndpoint) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let endpoint = PrinterEndpoint::new("127.0.0.1").unwrap().with_port(port);
    (listener, endpoint)
}

#[tokio::test]
async fn test_batch_over_one_connection() {
    let (listener, endpoint) = local_printer().await;

    let printer = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut received = Vec::new();
        socket.read_to_end(&mut received).await.unwrap();

        // No second connection for the same batch
        let second = tokio::time::timeout(Duration::from_millis(200), listener.accept()).await;
        (String::from_utf8(received).unwrap(), second.is_err())
    });

    let request = LabelRequest::new(
        LabelSize::Medium,
        &["ID123", "Cruise A", "2024-06-01", "Box 1"],
    )
    .unwrap()
    .with_copies(3)
    .unwrap()
    .with_increment(true);

    let mut job = PrintJob::new(NetworkPrinter::new());
    let report = job.run_batch(&request, &endpoint).await.unwrap();
    assert_eq!(report.documents_sent, 3);
    assert_eq!(job.state(), BatchState::Closed);

    let (received, single_connection) = printer.await.unwrap();
    assert!(single_connection);
    assert_eq!(received.matches("^PQ1,0,1,Y^XZ").count(), 3);
    for n in 1..=3 {
        assert!(received.contains(&format!("^FDBox {}^FS", n)));
    }
    assert!(!received.contains("Box 4"));
}

#[tokio::test]
async fn test_large_label_bytes() {
    let (listener, endpoint) = local_printer().await;

    let printer = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut received = Vec::new();
        socket.read_to_end(&mut received).await.unwrap();
        String::from_utf8(received).unwrap()
    });

    let request =
        LabelRequest::new(LabelSize::Large, &["Nansen", "Legacy", "Ålesund", "St 4", "CTD"]).unwrap();

    let mut job = PrintJob::new(NetworkPrinter::new());
    job.run_batch(&request, &endpoint).await.unwrap();

    let received = printer.await.unwrap();
    assert!(received.starts_with("\nCT~~CD,~CC^~CT~\n"));
    assert!(received.contains("^PW602\n"));
    assert!(received.contains("^FT35,171^A0N,42,40^FH\\^FDÅlesund^FS\n"));
    assert!(received.ends_with("^PQ1,0,1,Y^XZ"));
}

#[tokio::test]
async fn test_unreachable_printer() {
    let (listener, endpoint) = local_printer().await;
    drop(listener);

    let request = LabelRequest::new(LabelSize::Medium, &["a", "b", "c", "d"]).unwrap();
    let mut job = PrintJob::new(NetworkPrinter::new().with_timeout(Duration::from_secs(1)));

    let err = job.run_batch(&request, &endpoint).await.unwrap_err();
    assert!(err.is_connection_error());
    assert_eq!(job.state(), BatchState::Failed);
}
